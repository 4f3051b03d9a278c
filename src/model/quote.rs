use bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use crate::repository::repository_error::RepositoryResult;

/// A customer quote as stored in the quotes collection.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub cliente: String,
    #[serde(default)]
    pub descricao: String,
    pub data: String,
    #[serde(default)]
    pub itens: Vec<LineItem>,

    pub createdAt: Option<String>,
    pub updatedAt: Option<String>,
}

/// One priced deliverable of a quote. Rebuilt, with a new id, on every quote write.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub nome: String,
    pub quantidade: f64,
    pub percentualLucro: f64,
    pub custoUnitario: f64,
    pub custoTotal: f64,
    #[serde(default)]
    pub materiais: Vec<MaterialUsage>,
}

/// Consumption of one material by one line item.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUsage {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Weak reference: only checked when the material is deleted.
    pub materialId: Option<ObjectId>,
    pub quantidade: f64,
    pub folhasImpressas: f64,
    pub custoMaterial: f64,
    pub custoFolhas: f64,
    pub custoTotal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialSnapshot>,
}

/// Display copy of a material taken when the quote was written. Never refreshed.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSnapshot {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub descricao: Option<String>,
    pub valorFinalUnitario: Option<f64>,
}

/// Whole-document replacement of the client-editable quote fields.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteReplacement {
    pub cliente: String,
    pub descricao: String,
    pub data: String,
    pub itens: Vec<LineItem>,
}

impl QuoteReplacement {
    /// Builds the `$set` body, stamping `updatedAt`. `createdAt` is never touched.
    pub fn to_set_document(&self, updated_at: &str) -> RepositoryResult<Document> {
        let itens = bson::to_bson(&self.itens)?;
        Ok(doc! {
            "cliente": self.cliente.as_str(),
            "descricao": self.descricao.as_str(),
            "data": self.data.as_str(),
            "itens": itens,
            "updatedAt": updated_at,
        })
    }
}
