pub const PAGE_MESSAGE_BUS_CAPACITY: usize = 64;
