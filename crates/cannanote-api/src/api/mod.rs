// HTTP routes and form types

pub mod entries;
pub mod forms;
pub mod pages;
