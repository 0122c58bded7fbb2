//! Screens the dashboard can show.
//!
//! The app renders [`LoadingView`] until the first successful poll and
//! [`DashboardView`] afterwards.

mod dashboard;
mod loading;
mod traits;

pub use dashboard::DashboardView;
pub use loading::LoadingView;
pub use traits::ViewRenderer;
