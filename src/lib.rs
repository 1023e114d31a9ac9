pub mod record;
pub mod dataset;
pub mod filter;
pub mod aggregate;
pub mod view;
pub mod server;

pub use record::{ParseError, Product, Region, SalesRecord};
pub use dataset::{generate, Dataset, DatasetGenerator};
pub use filter::{filter_records, DateRange, FilterError, SalesDataProvider, SalesFilter};
pub use aggregate::{
    average_rating,
    daily_trend,
    product_share,
    rating_vs_sales,
    region_totals,
    total_sales,
    transaction_count,
};
pub use view::{render, DashboardView, ViewOptions};
pub use server::{run_server, ApiError, AppState, ConfigError, DataRefresh, ServerConfig};
