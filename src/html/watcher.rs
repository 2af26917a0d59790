/// Script for the game page. Include it with
/// `<script src="http://127.0.0.1:3030/overlay/watcher.js"></script>` and it reports every change of
/// `location.href` to `/overlay/navigation` on the service it was loaded from.
pub const NAVIGATION_WATCHER: &str = r#"(() => {
  const script = document.currentScript;
  const endpoint = new URL('/overlay/navigation', script ? script.src : 'http://127.0.0.1:3030/').href;
  let currentHref = document.location.href;

  const report = (href) =>
    fetch(endpoint, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ href }),
    }).catch((error) => console.error('Location overlay: failed to report navigation.', error));

  // Client-side routing changes the address without a page load.
  const observer = new MutationObserver(() => {
    if (currentHref !== document.location.href) {
      currentHref = document.location.href;
      report(currentHref);
    }
  });
  observer.observe(document, { childList: true, subtree: true });
})();
"#;
