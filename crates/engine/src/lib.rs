pub mod column;
pub mod currency;
pub mod pager;
pub mod presets;
pub mod render;
pub mod row;
pub mod voucher;
