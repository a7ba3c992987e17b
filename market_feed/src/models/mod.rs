pub mod daily_bar;

pub use daily_bar::DailyBar;
