//! `ApiRequest` impls for every wire operation.

use reqwest::{Client, RequestBuilder, Url};

use common::protocol::{
    DeleteRequest, DeleteResponse, HandshakeQuery, HandshakeResponse, RegisterRequest,
    RegisterResponse, RetrieveQuery, RetrieveResponse, StoreRequest, StoreResponse, UpdateRequest,
    UpdateResponse, VerifyRequest, VerifyResponse,
};

use super::{endpoint, ApiRequest};

impl ApiRequest for HandshakeQuery {
    type Response = HandshakeResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client.get(endpoint(base_url, "handshake")).query(&self)
    }
}

impl ApiRequest for VerifyRequest {
    type Response = VerifyResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client.post(endpoint(base_url, "verify")).json(&self)
    }
}

impl ApiRequest for StoreRequest {
    type Response = StoreResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client.post(endpoint(base_url, "store")).json(&self)
    }
}

impl ApiRequest for RetrieveQuery {
    type Response = RetrieveResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client.get(endpoint(base_url, "retrieve")).query(&self)
    }
}

impl ApiRequest for UpdateRequest {
    type Response = UpdateResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client.put(endpoint(base_url, "update")).json(&self)
    }
}

impl ApiRequest for DeleteRequest {
    type Response = DeleteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client.delete(endpoint(base_url, "delete")).json(&self)
    }
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client.post(endpoint(base_url, "register")).json(&self)
    }
}
