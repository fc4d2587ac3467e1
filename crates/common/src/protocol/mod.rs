//! Wire protocol message types.
//!
//! One request/response pair per operation, shared between the server
//! handlers and the client. Serde field names are the wire names: the
//! protocol uses terse keys (`time`, `loc`, `enc`, `epo`, `paste_id`)
//! that existing deployments depend on, so they are spelled out here
//! verbatim rather than renamed.

mod messages;

pub use messages::{
    DeleteRequest, DeleteResponse, ErrorBody, HandshakeQuery, HandshakeResponse, RecordEntry,
    RegisterRequest, RegisterResponse, RetrieveQuery, RetrieveResponse, StoreRequest,
    StoreResponse, UpdateRequest, UpdateResponse, VerifyRequest, VerifyResponse, STATUS_READY,
    STATUS_SUCCESS,
};
