use crate::model::quote::{LineItem, MaterialSnapshot, MaterialUsage, Quote, QuoteReplacement};
use crate::util::lenient::{blank_as_none, lenient_f64};
use crate::util::object_id;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

// --- Request side ---

/// Body of `POST /orcamentos` and `PUT /orcamentos`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct QuoteRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub cliente: Option<String>,

    #[serde(default)]
    pub descricao: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub data: Option<String>,

    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub itens: Option<Vec<LineItemRequest>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantidade: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentual_lucro: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub custo_unitario: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub custo_total: Option<f64>,
    #[serde(default)]
    pub materiais: Option<Vec<MaterialUsageRequest>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsageRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub material_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantidade: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub folhas_impressas: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub custo_material: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub custo_folhas: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub custo_total: Option<f64>,
    #[serde(default)]
    pub material: Option<MaterialSnapshotRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSnapshotRequest {
    #[serde(default, alias = "_id", deserialize_with = "blank_as_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub valor_final_unitario: Option<f64>,
}

/// Decodes a client-supplied reference. Malformed ids are dropped rather than rejected.
fn decode_reference(raw: Option<&str>) -> Option<ObjectId> {
    raw.and_then(|r| object_id::decode(r).ok())
}

impl From<MaterialSnapshotRequest> for MaterialSnapshot {
    fn from(snapshot: MaterialSnapshotRequest) -> Self {
        MaterialSnapshot {
            id: decode_reference(snapshot.id.as_deref()),
            descricao: snapshot.descricao,
            valorFinalUnitario: snapshot.valor_final_unitario,
        }
    }
}

impl From<MaterialUsageRequest> for MaterialUsage {
    fn from(usage: MaterialUsageRequest) -> Self {
        // An explicit materialId wins over the id inside the snapshot.
        let reference = usage
            .material_id
            .as_deref()
            .or_else(|| usage.material.as_ref().and_then(|m| m.id.as_deref()));
        let material_id = decode_reference(reference);

        MaterialUsage {
            id: ObjectId::new(),
            materialId: material_id,
            quantidade: usage.quantidade.unwrap_or(0.0),
            folhasImpressas: usage.folhas_impressas.unwrap_or(0.0),
            custoMaterial: usage.custo_material.unwrap_or(0.0),
            custoFolhas: usage.custo_folhas.unwrap_or(0.0),
            custoTotal: usage.custo_total.unwrap_or(0.0),
            material: usage.material.map(MaterialSnapshot::from),
        }
    }
}

impl From<LineItemRequest> for LineItem {
    fn from(item: LineItemRequest) -> Self {
        LineItem {
            id: ObjectId::new(),
            nome: item.nome.unwrap_or_default(),
            quantidade: item.quantidade.unwrap_or(0.0),
            percentualLucro: item.percentual_lucro.unwrap_or(0.0),
            custoUnitario: item.custo_unitario.unwrap_or(0.0),
            custoTotal: item.custo_total.unwrap_or(0.0),
            materiais: item
                .materiais
                .unwrap_or_default()
                .into_iter()
                .map(MaterialUsage::from)
                .collect(),
        }
    }
}

impl QuoteRequest {
    /// Normalizes a validated request. Every line item and usage gets a fresh id.
    pub fn into_replacement(self) -> QuoteReplacement {
        QuoteReplacement {
            cliente: self.cliente.unwrap_or_default(),
            descricao: self.descricao.unwrap_or_default(),
            data: self.data.unwrap_or_default(),
            itens: self
                .itens
                .unwrap_or_default()
                .into_iter()
                .map(LineItem::from)
                .collect(),
        }
    }

    pub fn into_quote(self) -> Quote {
        let replacement = self.into_replacement();
        Quote {
            id: None,
            cliente: replacement.cliente,
            descricao: replacement.descricao,
            data: replacement.data,
            itens: replacement.itens,
            createdAt: None,
            updatedAt: None,
        }
    }
}

// --- Response side: every id rendered as a hex string ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub cliente: String,
    pub descricao: String,
    pub data: String,
    pub itens: Vec<LineItemResponse>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub nome: String,
    pub quantidade: f64,
    pub percentual_lucro: f64,
    pub custo_unitario: f64,
    pub custo_total: f64,
    pub materiais: Vec<MaterialUsageResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsageResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub material_id: Option<String>,
    pub quantidade: f64,
    pub folhas_impressas: f64,
    pub custo_material: f64,
    pub custo_folhas: f64,
    pub custo_total: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub material: Option<MaterialSnapshotResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSnapshotResponse {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub descricao: Option<String>,
    pub valor_final_unitario: Option<f64>,
}

impl From<MaterialSnapshot> for MaterialSnapshotResponse {
    fn from(snapshot: MaterialSnapshot) -> Self {
        MaterialSnapshotResponse {
            id: object_id::encode_opt(snapshot.id.as_ref()),
            descricao: snapshot.descricao,
            valor_final_unitario: snapshot.valorFinalUnitario,
        }
    }
}

impl From<MaterialUsage> for MaterialUsageResponse {
    fn from(usage: MaterialUsage) -> Self {
        MaterialUsageResponse {
            id: object_id::encode(&usage.id),
            material_id: object_id::encode_opt(usage.materialId.as_ref()),
            quantidade: usage.quantidade,
            folhas_impressas: usage.folhasImpressas,
            custo_material: usage.custoMaterial,
            custo_folhas: usage.custoFolhas,
            custo_total: usage.custoTotal,
            material: usage.material.map(MaterialSnapshotResponse::from),
        }
    }
}

impl From<LineItem> for LineItemResponse {
    fn from(item: LineItem) -> Self {
        LineItemResponse {
            id: object_id::encode(&item.id),
            nome: item.nome,
            quantidade: item.quantidade,
            percentual_lucro: item.percentualLucro,
            custo_unitario: item.custoUnitario,
            custo_total: item.custoTotal,
            materiais: item.materiais.into_iter().map(MaterialUsageResponse::from).collect(),
        }
    }
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        QuoteResponse {
            id: object_id::encode_opt(quote.id.as_ref()),
            cliente: quote.cliente,
            descricao: quote.descricao,
            data: quote.data,
            itens: quote.itens.into_iter().map(LineItemResponse::from).collect(),
            created_at: quote.createdAt,
            updated_at: quote.updatedAt,
        }
    }
}
