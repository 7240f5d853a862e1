use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    self, value::Kind, vectors_config, CollectionInfo, CountPointsBuilder,
    CreateCollectionBuilder, Distance, PointId, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, Value as QdrantValue, VectorParams, VectorParamsBuilder,
};
use qdrant_client::{Qdrant, QdrantError};
use serde_json::Value;
use tracing::{debug, info};

use crate::application::VectorRepository;
use crate::domain::{DomainError, EmbeddedRecord, Match, Record};

/// Qdrant collection with cosine distance, one point per ingested record.
pub struct QdrantVectorRepository {
    client: Qdrant,
    collection_name: String,
    dimensions: usize,
}

impl QdrantVectorRepository {
    pub fn new(
        url: &str,
        api_key: Option<String>,
        collection_name: impl Into<String>,
        dimensions: usize,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let mut builder = Qdrant::from_url(url);

        if let Some(api_key) = api_key {
            builder = builder.api_key(api_key);
        }

        let client = builder
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::vector_store(format!("Failed to build client: {e}")))?;

        Ok(Self {
            client,
            collection_name: collection_name.into(),
            dimensions,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn store_error(e: QdrantError) -> DomainError {
    DomainError::vector_store(e.to_string())
}

fn point_id_to_string(point_id: Option<PointId>) -> Result<String, DomainError> {
    match point_id.and_then(|p| p.point_id_options) {
        Some(qdrant::point_id::PointIdOptions::Uuid(uuid)) => Ok(uuid),
        Some(qdrant::point_id::PointIdOptions::Num(num)) => Ok(num.to_string()),
        None => Err(DomainError::vector_store("search result without a point id")),
    }
}

fn single_vector_params(info: &CollectionInfo) -> Option<&VectorParams> {
    let config = info.config.as_ref()?.params.as_ref()?.vectors_config.as_ref()?;
    match config.config.as_ref()? {
        vectors_config::Config::Params(params) => Some(params),
        vectors_config::Config::ParamsMap(_) => None,
    }
}

/// An existing collection must have one unnamed cosine vector of the
/// configured size.
fn check_vector_params(
    collection: &str,
    params: Option<&VectorParams>,
    dimensions: usize,
) -> Result<(), DomainError> {
    let params = params.ok_or_else(|| {
        DomainError::vector_store(format!(
            "collection {collection} has no single unnamed vector configuration"
        ))
    })?;

    if params.size != dimensions as u64 {
        return Err(DomainError::vector_store(format!(
            "collection {collection} has {} dimensions, embedding model produces {dimensions}",
            params.size
        )));
    }

    if params.distance != Distance::Cosine as i32 {
        return Err(DomainError::vector_store(format!(
            "collection {collection} does not use cosine distance"
        )));
    }

    Ok(())
}

/// Nested objects and arrays are stored as Qdrant structs and lists, so the
/// payload comes back exactly as it was ingested.
pub(crate) fn json_to_qdrant(value: Value) -> QdrantValue {
    let kind = match value {
        Value::Null => Kind::NullValue(0),
        Value::Bool(b) => Kind::BoolValue(b),
        // Unsigned values above i64::MAX have no lossless Qdrant form and are
        // stored as their decimal string.
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Kind::IntegerValue(i),
            (None, Some(u)) => Kind::StringValue(u.to_string()),
            (None, None) => Kind::DoubleValue(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => Kind::StringValue(s),
        Value::Array(items) => Kind::ListValue(qdrant::ListValue {
            values: items.into_iter().map(json_to_qdrant).collect(),
        }),
        Value::Object(map) => Kind::StructValue(qdrant::Struct {
            fields: map
                .into_iter()
                .map(|(k, v)| (k, json_to_qdrant(v)))
                .collect(),
        }),
    };

    QdrantValue { kind: Some(kind) }
}

pub(crate) fn qdrant_to_json(value: QdrantValue) -> Value {
    match value.kind {
        None | Some(Kind::NullValue(_)) => Value::Null,
        Some(Kind::BoolValue(b)) => Value::Bool(b),
        Some(Kind::IntegerValue(i)) => Value::from(i),
        Some(Kind::DoubleValue(f)) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Some(Kind::StringValue(s)) => Value::String(s),
        Some(Kind::ListValue(list)) => {
            Value::Array(list.values.into_iter().map(qdrant_to_json).collect())
        }
        Some(Kind::StructValue(s)) => Value::Object(payload_to_record(s.fields)),
    }
}

pub(crate) fn record_to_payload(record: &Record) -> HashMap<String, QdrantValue> {
    record
        .iter()
        .map(|(k, v)| (k.clone(), json_to_qdrant(v.clone())))
        .collect()
}

pub(crate) fn payload_to_record(payload: HashMap<String, QdrantValue>) -> Record {
    payload
        .into_iter()
        .map(|(k, v)| (k, qdrant_to_json(v)))
        .collect()
}

#[async_trait]
impl VectorRepository for QdrantVectorRepository {
    async fn ensure_collection(&self) -> Result<(), DomainError> {
        let exists = self
            .client
            .collection_exists(&self.collection_name)
            .await
            .map_err(store_error)?;

        if exists {
            let info = self
                .client
                .collection_info(&self.collection_name)
                .await
                .map_err(store_error)?
                .result;
            check_vector_params(
                &self.collection_name,
                info.as_ref().and_then(single_vector_params),
                self.dimensions,
            )?;
            debug!("Collection {} already exists", self.collection_name);
            return Ok(());
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection_name).vectors_config(
                    VectorParamsBuilder::new(self.dimensions as u64, Distance::Cosine),
                ),
            )
            .await
            .map_err(store_error)?;

        info!(
            "Created collection {} ({} dimensions, cosine)",
            self.collection_name, self.dimensions
        );
        Ok(())
    }

    async fn upsert(&self, record: &EmbeddedRecord) -> Result<(), DomainError> {
        if record.dimensions() != self.dimensions {
            return Err(DomainError::vector_store(format!(
                "vector has {} dimensions, collection {} expects {}",
                record.dimensions(),
                self.collection_name,
                self.dimensions
            )));
        }

        let point = PointStruct::new(
            PointId::from(record.id().to_string()),
            record.vector().to_vec(),
            record_to_payload(record.payload()),
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection_name, vec![point]).wait(true))
            .await
            .map_err(store_error)?;

        debug!("Upserted point {}", record.id());
        Ok(())
    }

    async fn search(
        &self,
        vector: &[f32],
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<Match>, DomainError> {
        let builder = SearchPointsBuilder::new(&self.collection_name, vector.to_vec(), limit as u64)
            .score_threshold(threshold)
            .with_payload(true);

        let response = self.client.search_points(builder).await.map_err(store_error)?;

        response
            .result
            .into_iter()
            .map(|point| {
                let id = point_id_to_string(point.id)?;
                Ok(Match::new(id, payload_to_record(point.payload), point.score))
            })
            .collect()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let response = self
            .client
            .count(CountPointsBuilder::new(&self.collection_name).exact(true))
            .await
            .map_err(store_error)?;

        Ok(response.result.map(|r| r.count).unwrap_or(0))
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        self.client.health_check().await.map_err(store_error)?;
        Ok(())
    }

    fn collection_name(&self) -> &str {
        &self.collection_name
    }
}
