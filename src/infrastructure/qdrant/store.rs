//! Qdrant-backed implementation of the [`VectorStore`] port.
//!
//! Owns the client connection. Embedding inference happens server-side:
//! upserts and queries submit (text, model) documents, never raw vectors.

use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::config::QdrantConfig as ClientConfig;
use qdrant_client::qdrant::{
    point_id::PointIdOptions, vector::Vector as VectorVariant, vector_input,
    vectors::VectorsOptions, CreateCollectionBuilder, Distance, Document, PointId, PointStruct,
    Query, QueryPointsBuilder, UpsertPoints, Vector, VectorInput, VectorParamsBuilder, Vectors,
};
use qdrant_client::Qdrant;
use tracing::{debug, info};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{EmbeddingRequest, IndexPoint, QdrantConfig, SearchHit};
use crate::domain::ports::VectorStore;

/// Vector service client wrapping a Qdrant connection.
pub struct QdrantStore {
    client: Qdrant,
}

impl QdrantStore {
    /// Connect to the vector service described by `config`.
    pub fn connect(config: &QdrantConfig) -> DomainResult<Self> {
        info!(url = %config.url, "Connecting to Qdrant");

        let mut client_config = ClientConfig::from_url(&config.url)
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.timeout_ms));

        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("QDRANT_API_KEY").ok());
        if let Some(key) = api_key {
            client_config = client_config.api_key(key);
        }

        let client = Qdrant::new(client_config)
            .map_err(|e| DomainError::ServiceUnavailable(format!("Qdrant client: {e}")))?;

        Ok(Self { client })
    }

    /// (text, model) pair handed to the service for server-side inference.
    fn document(request: EmbeddingRequest) -> Document {
        Document {
            text: request.text,
            model: request.model,
            ..Default::default()
        }
    }

    fn point(point: IndexPoint) -> DomainResult<PointStruct> {
        let payload = match point.payload {
            serde_json::Value::Object(fields) => fields
                .into_iter()
                .map(|(k, v)| (k, json_to_qdrant_value(v)))
                .collect(),
            other => {
                return Err(DomainError::Serialization(format!(
                    "point payload must be an object, got: {other}"
                )))
            }
        };

        Ok(PointStruct {
            id: Some(PointId {
                point_id_options: Some(PointIdOptions::Num(point.id)),
            }),
            vectors: Some(Vectors {
                vectors_options: Some(VectorsOptions::Vector(Vector {
                    vector: Some(VectorVariant::Document(Self::document(point.embedding))),
                    ..Default::default()
                })),
            }),
            payload,
        })
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn collection_exists(&self, name: &str) -> DomainResult<bool> {
        self.client
            .collection_exists(name)
            .await
            .map_err(|e| DomainError::ServiceUnavailable(format!("collection check: {e}")))
    }

    async fn create_collection(&self, name: &str, vector_size: u64) -> DomainResult<()> {
        if self.collection_exists(name).await? {
            info!(collection = name, "Collection exists, deleting before recreate");
            self.client
                .delete_collection(name)
                .await
                .map_err(|e| DomainError::ServiceUnavailable(format!("delete collection: {e}")))?;
        }

        info!(collection = name, vector_size, "Creating collection");
        self.client
            .create_collection(
                CreateCollectionBuilder::new(name)
                    .vectors_config(VectorParamsBuilder::new(vector_size, Distance::Cosine)),
            )
            .await
            .map_err(|e| DomainError::ServiceUnavailable(format!("create collection: {e}")))?;

        Ok(())
    }

    async fn upsert_batch(&self, name: &str, points: Vec<IndexPoint>) -> DomainResult<()> {
        let count = points.len();
        let converted = points
            .into_iter()
            .map(Self::point)
            .collect::<DomainResult<Vec<_>>>()?;

        self.client
            .upsert_points(UpsertPoints {
                collection_name: name.to_string(),
                points: converted,
                wait: Some(true),
                ..Default::default()
            })
            .await
            .map_err(|e| DomainError::ServiceUnavailable(format!("upsert: {e}")))?;

        debug!(collection = name, count, "Upserted batch");
        Ok(())
    }

    async fn query(
        &self,
        name: &str,
        query: EmbeddingRequest,
        limit: usize,
    ) -> DomainResult<Vec<SearchHit>> {
        let response = self
            .client
            .query(
                QueryPointsBuilder::new(name)
                    .query(Query::new_nearest(VectorInput {
                        variant: Some(vector_input::Variant::Document(Self::document(query))),
                    }))
                    .limit(limit as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| DomainError::ServiceUnavailable(format!("query: {e}")))?;

        let hits = response
            .result
            .into_iter()
            .map(|scored| {
                let id = scored
                    .id
                    .and_then(|id| id.point_id_options)
                    .and_then(|options| match options {
                        PointIdOptions::Num(n) => Some(n),
                        PointIdOptions::Uuid(_) => None,
                    })
                    .unwrap_or_default();

                let payload = serde_json::Value::Object(
                    scored
                        .payload
                        .into_iter()
                        .map(|(k, v)| (k, qdrant_value_to_json(v)))
                        .collect(),
                );

                SearchHit {
                    id,
                    score: scored.score,
                    payload,
                }
            })
            .collect();

        Ok(hits)
    }
}

/// Convert a JSON value into a Qdrant payload value.
fn json_to_qdrant_value(value: serde_json::Value) -> qdrant_client::qdrant::Value {
    use qdrant_client::qdrant::value::Kind;
    use qdrant_client::qdrant::{ListValue, Struct, Value};

    let kind = match value {
        serde_json::Value::Null => Kind::NullValue(0),
        serde_json::Value::Bool(b) => Kind::BoolValue(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Kind::IntegerValue(i)
            } else if let Some(f) = n.as_f64() {
                Kind::DoubleValue(f)
            } else {
                Kind::StringValue(n.to_string())
            }
        }
        serde_json::Value::String(s) => Kind::StringValue(s),
        serde_json::Value::Array(items) => Kind::ListValue(ListValue {
            values: items.into_iter().map(json_to_qdrant_value).collect(),
        }),
        serde_json::Value::Object(fields) => Kind::StructValue(Struct {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k, json_to_qdrant_value(v)))
                .collect(),
        }),
    };

    Value { kind: Some(kind) }
}

/// Convert a Qdrant payload value back into plain JSON.
fn qdrant_value_to_json(value: qdrant_client::qdrant::Value) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind;

    match value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(Kind::IntegerValue(i)) => serde_json::Value::from(i),
        Some(Kind::DoubleValue(f)) => {
            serde_json::Number::from_f64(f).map_or(serde_json::Value::Null, serde_json::Value::Number)
        }
        Some(Kind::StringValue(s)) => serde_json::Value::String(s),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.into_iter().map(qdrant_value_to_json).collect())
        }
        Some(Kind::StructValue(fields)) => serde_json::Value::Object(
            fields
                .fields
                .into_iter()
                .map(|(k, v)| (k, qdrant_value_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::value::Kind;
    use qdrant_client::qdrant::{ListValue, Struct, Value};

    fn qv(kind: Kind) -> Value {
        Value { kind: Some(kind) }
    }

    #[test]
    fn converts_scalar_values() {
        assert_eq!(
            qdrant_value_to_json(qv(Kind::StringValue("Burger".into()))),
            serde_json::json!("Burger")
        );
        assert_eq!(
            qdrant_value_to_json(qv(Kind::IntegerValue(42))),
            serde_json::json!(42)
        );
        assert_eq!(
            qdrant_value_to_json(qv(Kind::DoubleValue(4.5))),
            serde_json::json!(4.5)
        );
        assert_eq!(
            qdrant_value_to_json(qv(Kind::BoolValue(true))),
            serde_json::json!(true)
        );
        assert_eq!(
            qdrant_value_to_json(qv(Kind::NullValue(0))),
            serde_json::Value::Null
        );
    }

    #[test]
    fn payload_values_round_trip() {
        let payload = serde_json::json!({
            "restaurant_name": "Restaurant A",
            "score": 4.5,
            "restaurant_id": 42,
            "description": null,
            "tags": ["burgers", "late-night"],
            "geo": { "lat": 39.78, "lng": -89.65 }
        });

        let round_tripped = qdrant_value_to_json(json_to_qdrant_value(payload.clone()));
        assert_eq!(round_tripped, payload);
    }

    #[test]
    fn converts_nested_values() {
        let nested = qv(Kind::StructValue(Struct {
            fields: [(
                "items".to_string(),
                qv(Kind::ListValue(ListValue {
                    values: vec![qv(Kind::StringValue("a".into()))],
                })),
            )]
            .into_iter()
            .collect(),
        }));

        assert_eq!(
            qdrant_value_to_json(nested),
            serde_json::json!({ "items": ["a"] })
        );
    }
}
