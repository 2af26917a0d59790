pub const COORD_UPDATE_THRESHOLD: f64 = 0.01;
