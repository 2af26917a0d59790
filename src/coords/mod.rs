pub mod consts;
pub mod models;
#[cfg(test)]
mod tests;

pub use models::CoordinatePair;

/// Whether `next` is worth displaying given the coordinate shown last.
///
/// Each axis is compared on its own against `threshold`; this is not a distance metric.
pub fn is_significant_change(
    previous: Option<CoordinatePair>,
    next: CoordinatePair,
    threshold: f64,
) -> bool {
    match previous {
        None => true,
        Some(previous) => {
            (next.lat - previous.lat).abs() > threshold
                || (next.lng - previous.lng).abs() > threshold
        }
    }
}
