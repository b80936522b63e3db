pub mod bread_crumb;
pub mod card;
pub mod charts;
pub mod form_field_error;
pub mod hints;
pub mod money;
pub mod page_header;
pub mod server_error_msg;
pub mod tabs;
pub mod toast;
