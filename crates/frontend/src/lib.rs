//! Client-side core of the finance front-end: reactive forms, routing, the
//! REST resource services and the generic create/edit form controller.

pub mod categories;
pub mod controller;
pub mod entries;
pub mod field_error;
pub mod form;
pub mod list;
pub mod reports;
pub mod rest;
pub mod route;
pub mod service;

pub use controller::{
    Effect, FormDefinition, FormState, FormStatus, ResourceFormController, ToastLevel,
};
pub use rest::{ClientError, RestClient, RestResource};
pub use route::{ActivatedRoute, Collection, Mode, Page, RouteError, Router};
pub use service::{Resource, ResourceService, ServiceError};
