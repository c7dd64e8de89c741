#![doc = "The `tasklane` library crate."]
#![doc = ""]
#![doc = "A minimal authenticated task-management REST API: users register and log in"]
#![doc = "with JWTs, then create and list their own tasks. The crate contains the"]
#![doc = "authentication core (credential hashing, token issuance/verification,"]
#![doc = "identity extraction middleware, auth orchestration), the domain models,"]
#![doc = "routing configuration, and error handling. The binary (`main.rs`) is the"]
#![doc = "composition root that wires everything together at startup."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
