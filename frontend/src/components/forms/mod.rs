pub mod bill_form;
pub mod denomination_panel;
pub mod line_item_editor;

pub use bill_form::BillForm;
