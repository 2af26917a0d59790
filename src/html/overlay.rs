/// The overlay page. It hosts the map surface and carries out the render commands it receives
/// over `/overlay/ws`.
pub const OVERLAY_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Location overlay</title>
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin="anonymous"></script>
  <style>
    html, body { margin: 0; background: transparent; }
  </style>
</head>
<body>
<script>
(() => {
  const ui = { host: null, root: null, map: null, toggle: null, leaflet: null, marker: null };
  let socket = null;

  const send = (message) => {
    if (socket && socket.readyState === WebSocket.OPEN) socket.send(JSON.stringify(message));
  };

  const unmount = () => {
    if (ui.leaflet) ui.leaflet.remove();
    if (ui.host) ui.host.remove();
    Object.keys(ui).forEach((key) => { ui[key] = null; });
  };

  const applyLayout = (layout) => {
    if (!ui.host || layout.hostId !== ui.host.id) return;
    ui.host.style.display = layout.hostDisplayed ? 'block' : 'none';
    ui.host.style.height = layout.hostHeight;
    ui.map.style.display = layout.mapDisplayed ? 'block' : 'none';
    ui.toggle.textContent = layout.toggleLabel;
  };

  const mount = ({ ids, stylesheet, icons, layout }) => {
    unmount();
    ui.host = document.createElement('div');
    ui.host.id = ids.host;
    Object.assign(ui.host.style, {
      position: 'fixed', top: '10px', left: '10px', zIndex: '9999', width: '350px',
      overflow: 'visible', border: '1px solid #ccc', borderRadius: '5px',
      boxShadow: '0 2px 5px rgba(0,0,0,0.2)', backgroundColor: 'white',
      transition: 'height 0.2s ease-in-out',
    });
    document.body.appendChild(ui.host);
    ui.root = ui.host.attachShadow({ mode: 'closed' });
    const style = document.createElement('style');
    style.textContent = stylesheet;
    ui.root.appendChild(style);
    const container = document.createElement('div');
    container.id = ids.overlay;
    Object.assign(container.style, { position: 'relative', width: '100%', height: '100%', overflow: 'hidden' });
    ui.root.appendChild(container);
    ui.map = document.createElement('div');
    ui.map.id = ids.map;
    Object.assign(ui.map.style, { width: '100%', height: '100%' });
    container.appendChild(ui.map);
    ui.toggle = document.createElement('button');
    ui.toggle.id = ids.toggle;
    Object.assign(ui.toggle.style, {
      position: 'absolute', top: '3px', right: '3px', zIndex: '1000', backgroundColor: '#ffcc00',
      border: '1px solid #cc9900', borderRadius: '3px', padding: '1px 5px', fontSize: '14px',
      fontWeight: 'bold', lineHeight: '1', cursor: 'pointer',
    });
    ui.toggle.addEventListener('click', () => send({ type: 'ToggleVisibility' }));
    container.appendChild(ui.toggle);
    delete L.Icon.Default.prototype._getIconUrl;
    L.Icon.Default.mergeOptions({
      iconUrl: icons.iconUrl, iconRetinaUrl: icons.iconRetinaUrl, shadowUrl: icons.shadowUrl,
      iconSize: icons.iconSize, iconAnchor: icons.iconAnchor, popupAnchor: icons.popupAnchor,
      shadowSize: icons.shadowSize,
    });
    applyLayout(layout);
  };

  const createMap = ({ center, zoom, tiles }) => {
    if (!ui.map) return;
    if (ui.leaflet) ui.leaflet.remove();
    ui.leaflet = L.map(ui.map, { scrollWheelZoom: true, zoomControl: false, attributionControl: false })
      .setView([center.lat, center.lng], zoom);
    L.tileLayer(tiles.urlTemplate, { subdomains: tiles.subdomains, maxZoom: tiles.maxZoom }).addTo(ui.leaflet);
    ui.marker = null;
  };

  const placeMarker = (position) => {
    if (!ui.leaflet) return;
    if (ui.marker) ui.marker.setLatLng([position.lat, position.lng]);
    else ui.marker = L.marker([position.lat, position.lng]).addTo(ui.leaflet);
  };

  const handlers = {
    MountSurface: (payload) => mount(payload),
    SetLayout: (payload) => applyLayout(payload),
    UnmountSurface: () => unmount(),
    CreateMap: (payload) => createMap(payload),
    SetView: ({ center, zoom }) => ui.leaflet && ui.leaflet.setView([center.lat, center.lng], zoom ?? ui.leaflet.getZoom()),
    PlaceMarker: (payload) => placeMarker(payload),
    InvalidateSize: () => requestAnimationFrame(() => ui.leaflet && ui.leaflet.invalidateSize()),
    Pong: () => {},
  };

  const connect = () => {
    const scheme = location.protocol === 'https:' ? 'wss' : 'ws';
    socket = new WebSocket(`${scheme}://${location.host}/overlay/ws`);
    socket.addEventListener('message', (event) => {
      try {
        const message = JSON.parse(event.data);
        const handler = handlers[message.type];
        if (handler) handler(message.payload);
      } catch (error) {
        console.error('Location overlay: failed to apply a command.', error);
      }
    });
    socket.addEventListener('close', () => setTimeout(connect, 1000));
  };

  setInterval(() => send({ type: 'Ping' }), 30000);
  connect();
})();
</script>
</body>
</html>
"#;
