use crate::{ClientResult, RxClient};
use api_shared::MedicationQuery;
use rx_core::medication::Medication;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// CRUD operations on one REST collection.
///
/// `T` is the stored record, `D` the draft sent on create and update, `Q` the list filters.
pub struct Resource<'a, T, D, Q> {
    client: &'a RxClient,
    plural: &'static str,
    singular: &'static str,
    _types: PhantomData<fn() -> (T, D, Q)>,
}

impl<'a, T, D, Q> Resource<'a, T, D, Q>
where
    T: DeserializeOwned,
    D: Serialize,
    Q: Serialize,
{
    pub(crate) fn new(client: &'a RxClient, plural: &'static str, singular: &'static str) -> Self {
        Self {
            client,
            plural,
            singular,
            _types: PhantomData,
        }
    }

    fn item_url(&self, id: &str) -> String {
        self.client.url(&format!("{}/{}", self.plural, id))
    }

    pub async fn list(&self, filters: &Q) -> ClientResult<Vec<T>> {
        let request = self.client.http.get(self.client.url(self.plural)).query(filters);
        self.client
            .send_json(request, format!("Failed to fetch {}", self.plural))
            .await
    }

    pub async fn get(&self, id: &str) -> ClientResult<T> {
        let request = self.client.http.get(self.item_url(id));
        self.client
            .send_json(request, format!("Failed to fetch {}", self.singular))
            .await
    }

    pub async fn create(&self, draft: &D) -> ClientResult<T> {
        let request = self.client.http.post(self.client.url(self.plural)).json(draft);
        self.client
            .send_json(request, format!("Failed to create {}", self.singular))
            .await
    }

    /// Sends a partial update with `PUT`; absent draft fields are left unchanged.
    pub async fn update(&self, id: &str, patch: &D) -> ClientResult<T> {
        let request = self.client.http.put(self.item_url(id)).json(patch);
        self.client
            .send_json(request, format!("Failed to update {}", self.singular))
            .await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let request = self.client.http.delete(self.item_url(id));
        self.client
            .send(request, format!("Failed to delete {}", self.singular))
            .await?;
        Ok(())
    }
}

/// Read-only access to the medication catalog.
pub struct Catalog<'a> {
    client: &'a RxClient,
}

impl<'a> Catalog<'a> {
    pub(crate) fn new(client: &'a RxClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, search: Option<&str>) -> ClientResult<Vec<Medication>> {
        let query = MedicationQuery {
            search: search.map(str::to_string),
        };
        let request = self
            .client
            .http
            .get(self.client.url("medications"))
            .query(&query);
        self.client
            .send_json(request, "Failed to fetch medications".into())
            .await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Medication> {
        let request = self
            .client
            .http
            .get(self.client.url(&format!("medications/{id}")));
        self.client
            .send_json(request, "Failed to fetch medication".into())
            .await
    }
}
