//! Provider registry
//!
//! Maps data source names to their resources and drives a single read.

use crate::error::SdkError;
use crate::resource_data::ResourceData;
use crate::schema::{Resource, SchemaMap};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A provider: its own configuration schema and its data sources
pub struct Provider<M: ?Sized + Send + Sync> {
    pub schema: SchemaMap,
    pub data_sources: BTreeMap<String, Resource<M>>,
}

impl<M: ?Sized + Send + Sync> Provider<M> {
    pub fn new(schema: SchemaMap) -> Self {
        Self {
            schema,
            data_sources: BTreeMap::new(),
        }
    }

    /// Register a data source under `name`
    pub fn with_data_source(mut self, name: impl Into<String>, resource: Resource<M>) -> Self {
        self.data_sources.insert(name.into(), resource);
        self
    }

    pub fn data_source(&self, name: &str) -> Option<&Resource<M>> {
        self.data_sources.get(name)
    }

    /// Validate the provider configuration against the provider schema
    pub fn configure(&self, config: Map<String, Value>) -> Result<ResourceData, SdkError> {
        ResourceData::new(self.schema.clone(), config)
    }

    /// Run one read of data source `name` with the user `config`
    ///
    /// Warnings are logged; error diagnostics are returned as
    /// [`SdkError::Diagnostics`].
    pub async fn read_data_source(
        &self,
        name: &str,
        config: Map<String, Value>,
        meta: &M,
    ) -> Result<ResourceData, SdkError> {
        let resource = self
            .data_source(name)
            .ok_or_else(|| SdkError::UnknownDataSource(name.to_string()))?;
        let reader = resource
            .read
            .as_ref()
            .ok_or_else(|| SdkError::NoReader(name.to_string()))?;

        let mut data = ResourceData::new(resource.schema.clone(), config)?;
        debug!("Reading data source {}", name);

        let diags = reader.read(&mut data, meta).await;
        for diag in diags.iter() {
            warn!("{}: {}", name, diag.summary);
        }
        if diags.has_error() {
            return Err(SdkError::Diagnostics(diags));
        }

        Ok(data)
    }
}
