use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

use crate::{error::LookupError, model::Address};

use super::{AddressResolver, fetch_json};

/// Field ViaCEP adds to an otherwise successful response when the CEP is unknown.
const NOT_FOUND_MARKER: &str = "erro";

#[derive(Debug, Clone)]
pub struct ViaCepResolver {
    base_url: String,
    http: Client,
}

impl ViaCepResolver {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http }
    }

    fn lookup_url(&self, cep: &str) -> String {
        format!("{}/{cep}/json/", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AddressResolver for ViaCepResolver {
    async fn resolve_address(&self, cep: &str) -> Result<Address, LookupError> {
        let url = self.lookup_url(cep);
        tracing::debug!(%url, "resolving address");

        let payload: Map<String, Value> =
            fetch_json(self.http.get(&url)).await.map_err(LookupError::AddressService)?;

        address_from_payload(&payload)
    }
}

fn address_from_payload(payload: &Map<String, Value>) -> Result<Address, LookupError> {
    if payload.contains_key(NOT_FOUND_MARKER) {
        return Err(LookupError::PostalCodeNotFound);
    }

    match (non_empty(payload, "localidade"), non_empty(payload, "uf")) {
        (Some(city), Some(state)) => {
            Ok(Address { city: city.to_string(), state: state.to_string() })
        }
        _ => Err(LookupError::IncompleteAddress),
    }
}

fn non_empty<'a>(payload: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}
