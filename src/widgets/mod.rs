pub mod chrome;
pub mod form;
pub mod form_widget;
pub mod status_bar;
