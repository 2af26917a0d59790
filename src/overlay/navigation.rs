use crate::overlay::consts::IN_ROUND_ROUTES;

pub fn is_in_round(href: &str) -> bool {
    IN_ROUND_ROUTES.iter().any(|route| href.contains(route))
}
