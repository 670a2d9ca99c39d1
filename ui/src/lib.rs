//! Shared UI crate for Stageboard: the chart engine, the data adapter and
//! the Dioxus views used by both the web and desktop shells.

pub mod chart;
pub mod core;
pub mod dashboard;
pub mod data;
pub mod i18n;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;
}
