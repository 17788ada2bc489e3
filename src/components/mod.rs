pub mod dashboard;
pub mod forecast;
pub mod report_body;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use dashboard::{Dashboard, DashboardProps};
pub use forecast::{ForecastRow, ForecastRowProps};
pub use report_body::{ERROR_ICON, ERROR_MESSAGE, ReportBody, ReportBodyProps};
pub use search_bar::{ClickTarget, SearchBar, SearchBarLayout, SearchBarProps};
