//! Vertex AI Vector Stores Module
//!
//! Support for vector databases and semantic search in Vertex AI

use super::error::VertexAIError;
use serde::{Deserialize, Serialize};

/// Vector store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    pub store_id: String,
    pub display_name: String,
    pub description: Option<String>,
    pub embedding_model: String,
    pub dimensions: usize,
    pub distance_measure: DistanceMeasure,
}

/// Distance measure for vector similarity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistanceMeasure {
    SquaredL2Distance,
    CosineDistance,
    DotProductDistance,
}

/// Vector document for storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDocument {
    pub id: String,
    pub content: String,
    pub metadata: Option<serde_json::Value>,
    pub embedding: Option<Vec<f32>>,
}

/// Vector search request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchRequest {
    pub query: String,
    pub k: Option<usize>,
    pub filter: Option<serde_json::Value>,
    pub include_metadata: Option<bool>,
}

/// Vector search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchResult {
    pub document: VectorDocument,
    pub score: f32,
    pub distance: f32,
}

/// Vector search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchResponse {
    pub results: Vec<VectorSearchResult>,
    pub total_count: usize,
}

/// Vector store operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreOperation {
    pub operation_type: OperationType,
    pub document: VectorDocument,
}

/// Operation type for vector store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Insert,
    Update,
    Delete,
    Upsert,
}

/// Vector store handler
pub struct VectorStoreHandler {
    project_id: String,
    location: String,
}

impl VectorStoreHandler {
    /// Create new vector store handler
    pub fn new(project_id: String, location: String) -> Self {
        Self {
            project_id,
            location,
        }
    }

    /// Create a new vector store
    pub async fn create_vector_store(
        &self,
        config: VectorStoreConfig,
    ) -> Result<String, VertexAIError> {
        self.validate_config(&config)?;

        // TODO: Implement actual vector store creation
        Ok(format!(
            "projects/{}/locations/{}/vectorStores/{}",
            self.project_id, self.location, config.store_id
        ))
    }

    /// List vector stores
    pub async fn list_vector_stores(&self) -> Result<Vec<VectorStoreConfig>, VertexAIError> {
        // TODO: Implement actual listing
        Ok(vec![])
    }

    /// Delete vector store
    pub async fn delete_vector_store(&self, _store_id: &str) -> Result<(), VertexAIError> {
        // TODO: Implement actual deletion
        Ok(())
    }

    /// Add documents to vector store
    pub async fn add_documents(
        &self,
        _store_id: &str,
        documents: Vec<VectorDocument>,
    ) -> Result<Vec<String>, VertexAIError> {
        self.validate_documents(&documents)?;

        // TODO: Implement actual document addition
        Ok(documents.iter().map(|doc| doc.id.clone()).collect())
    }

    /// Update documents in vector store
    pub async fn update_documents(
        &self,
        _store_id: &str,
        documents: Vec<VectorDocument>,
    ) -> Result<Vec<String>, VertexAIError> {
        self.validate_documents(&documents)?;

        // TODO: Implement actual document updates
        Ok(documents.iter().map(|doc| doc.id.clone()).collect())
    }

    /// Delete documents from vector store
    pub async fn delete_documents(
        &self,
        _store_id: &str,
        _document_ids: Vec<String>,
    ) -> Result<(), VertexAIError> {
        // TODO: Implement actual document deletion
        Ok(())
    }

    /// Search vectors in store
    pub async fn search_vectors(
        &self,
        _store_id: &str,
        request: VectorSearchRequest,
    ) -> Result<VectorSearchResponse, VertexAIError> {
        self.validate_search_request(&request)?;

        // TODO: Implement actual vector search
        Ok(VectorSearchResponse {
            results: vec![],
            total_count: 0,
        })
    }

    /// Batch operations on vector store
    pub async fn batch_operations(
        &self,
        _store_id: &str,
        _operations: Vec<VectorStoreOperation>,
    ) -> Result<Vec<String>, VertexAIError> {
        // TODO: Implement batch operations
        Ok(vec![])
    }

    /// Validate vector store configuration
    fn validate_config(&self, config: &VectorStoreConfig) -> Result<(), VertexAIError> {
        if config.store_id.is_empty() {
            return Err(VertexAIError::InvalidRequest(
                "Store ID cannot be empty".to_string(),
            ));
        }

        if config.display_name.is_empty() {
            return Err(VertexAIError::InvalidRequest(
                "Display name cannot be empty".to_string(),
            ));
        }

        if config.dimensions == 0 {
            return Err(VertexAIError::InvalidRequest(
                "Dimensions must be greater than 0".to_string(),
            ));
        }

        if config.dimensions > 2048 {
            return Err(VertexAIError::InvalidRequest(
                "Dimensions cannot exceed 2048".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate documents for vector store
    fn validate_documents(&self, documents: &[VectorDocument]) -> Result<(), VertexAIError> {
        if documents.is_empty() {
            return Err(VertexAIError::InvalidRequest(
                "No documents provided".to_string(),
            ));
        }

        for doc in documents {
            if doc.id.is_empty() {
                return Err(VertexAIError::InvalidRequest(
                    "Document ID cannot be empty".to_string(),
                ));
            }

            if doc.content.is_empty() {
                return Err(VertexAIError::InvalidRequest(
                    "Document content cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Validate search request
    fn validate_search_request(&self, request: &VectorSearchRequest) -> Result<(), VertexAIError> {
        if request.query.is_empty() {
            return Err(VertexAIError::InvalidRequest(
                "Search query cannot be empty".to_string(),
            ));
        }

        if let Some(k) = request.k {
            if k == 0 || k > 1000 {
                return Err(VertexAIError::InvalidRequest(
                    "k must be between 1 and 1000".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Helper functions for vector operations
impl VectorStoreHandler {
    /// Calculate cosine similarity between two vectors
    pub fn cosine_similarity(vec1: &[f32], vec2: &[f32]) -> f32 {
        if vec1.len() != vec2.len() {
            return 0.0;
        }

        let dot_product: f32 = vec1.iter().zip(vec2.iter()).map(|(a, b)| a * b).sum();
        let norm1: f32 = vec1.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm2: f32 = vec2.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm1 == 0.0 || norm2 == 0.0 {
            0.0
        } else {
            dot_product / (norm1 * norm2)
        }
    }

    /// Calculate L2 distance between two vectors
    pub fn l2_distance(vec1: &[f32], vec2: &[f32]) -> f32 {
        if vec1.len() != vec2.len() {
            return f32::INFINITY;
        }

        vec1.iter()
            .zip(vec2.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f32>()
            .sqrt()
    }

    /// Normalize vector to unit length
    pub fn normalize_vector(vector: &mut [f32]) {
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in vector.iter_mut() {
                *value /= norm;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let vec1 = vec![1.0, 2.0, 3.0];
        let vec2 = vec![4.0, 5.0, 6.0];

        let similarity = VectorStoreHandler::cosine_similarity(&vec1, &vec2);
        assert!(similarity > 0.0);
        assert!(similarity <= 1.0);
    }

    #[test]
    fn test_l2_distance() {
        let vec1 = vec![1.0, 2.0, 3.0];
        let vec2 = vec![4.0, 5.0, 6.0];

        let distance = VectorStoreHandler::l2_distance(&vec1, &vec2);
        assert!(distance > 0.0);
    }

    #[test]
    fn test_normalize_vector() {
        let mut vector = vec![3.0, 4.0];
        VectorStoreHandler::normalize_vector(&mut vector);

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_validate_config() {
        let handler = VectorStoreHandler::new("test".to_string(), "us-central1".to_string());

        let valid_config = VectorStoreConfig {
            store_id: "test-store".to_string(),
            display_name: "Test Store".to_string(),
            description: Some("Test description".to_string()),
            embedding_model: "text-embedding-004".to_string(),
            dimensions: 768,
            distance_measure: DistanceMeasure::CosineDistance,
        };

        assert!(handler.validate_config(&valid_config).is_ok());

        let invalid_config = VectorStoreConfig {
            store_id: "".to_string(),
            display_name: "".to_string(),
            description: None,
            embedding_model: "text-embedding-004".to_string(),
            dimensions: 0,
            distance_measure: DistanceMeasure::CosineDistance,
        };

        assert!(handler.validate_config(&invalid_config).is_err());
    }
}
