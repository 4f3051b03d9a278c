use crate::model::material::{Material, MaterialPatch};
use crate::util::lenient::{blank_as_none, lenient_f64};
use crate::util::object_id;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /produtos` and `PUT /produtos`.
///
/// Every field is optional on the wire: creation requires all of them except
/// `precoAnterior` (checked through `validate`), an update applies whichever
/// are present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRequest {
    #[serde(default, deserialize_with = "lenient_f64")]
    #[validate(required)]
    pub quantidade: Option<f64>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub descricao: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    #[validate(required)]
    pub preco_pacote: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub preco_anterior: Option<f64>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub loja: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    #[validate(required)]
    pub valor_final_unitario: Option<f64>,
}

impl MaterialRequest {
    /// Builds a new material. Call after a successful `validate`; absent fields fall back to zero values.
    pub fn into_material(self) -> Material {
        Material {
            id: None,
            quantidade: self.quantidade.unwrap_or_default(),
            descricao: self.descricao.unwrap_or_default(),
            precoPacote: self.preco_pacote.unwrap_or_default(),
            precoAnterior: self.preco_anterior.unwrap_or(0.0),
            loja: self.loja.unwrap_or_default(),
            valorFinalUnitario: self.valor_final_unitario.unwrap_or_default(),
            createdAt: None,
            updatedAt: None,
        }
    }

    pub fn into_patch(self) -> MaterialPatch {
        MaterialPatch {
            quantidade: self.quantidade,
            descricao: self.descricao,
            preco_pacote: self.preco_pacote,
            preco_anterior: self.preco_anterior,
            loja: self.loja,
            valor_final_unitario: self.valor_final_unitario,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialResponse {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub quantidade: f64,
    pub descricao: String,
    pub preco_pacote: f64,
    pub preco_anterior: f64,
    pub loja: String,
    pub valor_final_unitario: f64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Material> for MaterialResponse {
    fn from(material: Material) -> Self {
        MaterialResponse {
            id: object_id::encode_opt(material.id.as_ref()),
            quantidade: material.quantidade,
            descricao: material.descricao,
            preco_pacote: material.precoPacote,
            preco_anterior: material.precoAnterior,
            loja: material.loja,
            valor_final_unitario: material.valorFinalUnitario,
            created_at: material.createdAt,
            updated_at: material.updatedAt,
        }
    }
}
