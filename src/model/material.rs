use bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A catalog entry as stored in the materials collection.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub quantidade: f64,
    pub descricao: String,
    pub precoPacote: f64,
    #[serde(default)]
    pub precoAnterior: f64,
    pub loja: String,
    pub valorFinalUnitario: f64,

    pub createdAt: Option<String>,
    pub updatedAt: Option<String>,
}

/// Field-level partial update of a material. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialPatch {
    pub quantidade: Option<f64>,
    pub descricao: Option<String>,
    pub preco_pacote: Option<f64>,
    pub preco_anterior: Option<f64>,
    pub loja: Option<String>,
    pub valor_final_unitario: Option<f64>,
}

impl MaterialPatch {
    pub fn is_empty(&self) -> bool {
        self.quantidade.is_none()
            && self.descricao.is_none()
            && self.preco_pacote.is_none()
            && self.preco_anterior.is_none()
            && self.loja.is_none()
            && self.valor_final_unitario.is_none()
    }

    /// Builds the `$set` body for this patch, stamping `updatedAt`.
    pub fn to_set_document(&self, updated_at: &str) -> Document {
        let mut set = Document::new();
        if let Some(v) = self.quantidade {
            set.insert("quantidade", v);
        }
        if let Some(ref v) = self.descricao {
            set.insert("descricao", v.as_str());
        }
        if let Some(v) = self.preco_pacote {
            set.insert("precoPacote", v);
        }
        if let Some(v) = self.preco_anterior {
            set.insert("precoAnterior", v);
        }
        if let Some(ref v) = self.loja {
            set.insert("loja", v.as_str());
        }
        if let Some(v) = self.valor_final_unitario {
            set.insert("valorFinalUnitario", v);
        }
        set.insert("updatedAt", updated_at);
        set
    }
}
