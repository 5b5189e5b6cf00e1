pub mod alert;
pub mod card;
pub mod charts;
pub mod form;
pub mod nav;
