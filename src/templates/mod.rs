//! Security rule categories and their markdown templates.

pub mod catalog;
pub mod store;

pub use catalog::{all_category_ids, category, Category, Group, CATEGORIES};
pub use store::{
    load_many, DirectoryStore, EmbeddedStore, Section, Template, TemplateSet, TemplateStore,
};
