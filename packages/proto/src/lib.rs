//! Generated gRPC bindings for inter-service contracts.

pub mod profile {
    tonic::include_proto!("elaview.profile");
}
