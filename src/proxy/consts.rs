pub const MAX_FORWARDED_BODY_SIZE: usize = 16 * 1024 * 1024;
