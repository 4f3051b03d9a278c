mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, send, setup_app, setup_unreachable_app};
use serde_json::{json, Value};
use std::collections::HashSet;

fn quote_body(cliente: &str, material_id: &str) -> Value {
    json!({
        "cliente": cliente,
        "descricao": "Kit aniversário",
        "data": "16/10/2026",
        "itens": [
            {
                "nome": "Convite",
                "quantidade": "50",
                "percentualLucro": 40,
                "custoUnitario": "1.10",
                "custoTotal": 55,
                "materiais": [
                    {
                        "materialId": material_id,
                        "quantidade": 2,
                        "folhasImpressas": "25",
                        "custoMaterial": 12.5,
                        "custoFolhas": 5,
                        "custoTotal": 17.5,
                        "material": { "_id": material_id, "descricao": "Papel couché", "valorFinalUnitario": 0.5 }
                    }
                ]
            },
            { "nome": "Tag", "materiais": [] }
        ]
    })
}

fn nested_ids(quote: &Value) -> HashSet<String> {
    let mut ids = HashSet::new();
    for item in quote["itens"].as_array().unwrap() {
        ids.insert(item["_id"].as_str().unwrap().to_string());
        for usage in item["materiais"].as_array().unwrap() {
            ids.insert(usage["_id"].as_str().unwrap().to_string());
        }
    }
    ids
}

#[tokio::test]
async fn test_create_quote_normalizes_items() {
    let app = setup_app();
    let material_id = bson::oid::ObjectId::new().to_hex();
    let resp = send(&app.router, "POST", "/orcamentos", Some(quote_body("Ana", &material_id))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = body_json(resp).await;
    assert!(body["_id"].is_string());
    assert_eq!(body["cliente"], json!("Ana"));
    assert_eq!(body["data"], json!("16/10/2026"));

    let item = &body["itens"][0];
    assert!(item["_id"].is_string());
    assert_eq!(item["quantidade"], json!(50.0));
    assert_eq!(item["custoUnitario"], json!(1.1));

    let usage = &item["materiais"][0];
    assert!(usage["_id"].is_string());
    assert_eq!(usage["materialId"], json!(material_id));
    assert_eq!(usage["folhasImpressas"], json!(25.0));
    assert_eq!(usage["material"]["_id"], json!(material_id));
    assert_eq!(usage["material"]["descricao"], json!("Papel couché"));

    let tag = &body["itens"][1];
    assert_eq!(tag["quantidade"], json!(0.0));
    assert_eq!(tag["percentualLucro"], json!(0.0));
    assert_eq!(tag["materiais"], json!([]));

    // stored reference is native, not text
    let stored = app.quotes.snapshot();
    assert_eq!(
        stored[0].itens[0].materiais[0].materialId.map(|id| id.to_hex()),
        Some(material_id)
    );
}

#[tokio::test]
async fn test_create_quote_with_malformed_reference_stores_null() {
    let app = setup_app();
    let resp = send(
        &app.router,
        "POST",
        "/orcamentos",
        Some(json!({
            "cliente": "Ana",
            "data": "16/10/2026",
            "itens": [{ "materiais": [{ "materialId": "123", "quantidade": 1 }] }]
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["itens"][0]["materiais"][0]["materialId"], Value::Null);
}

#[tokio::test]
async fn test_create_quote_requires_cliente_data_and_items() {
    let app = setup_app();
    let cases = [
        json!({ "data": "16/10/2026", "itens": [{}] }),
        json!({ "cliente": "Ana", "itens": [{}] }),
        json!({ "cliente": "Ana", "data": "16/10/2026" }),
        json!({ "cliente": "Ana", "data": "16/10/2026", "itens": [] }),
        json!({ "cliente": "", "data": "16/10/2026", "itens": [{}] }),
    ];
    for case in cases {
        let resp = send(&app.router, "POST", "/orcamentos", Some(case.clone())).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", case);
        assert_eq!(
            body_json(resp).await,
            json!({ "message": "Cliente, data e itens são obrigatórios." })
        );
    }
    assert_eq!(app.quotes.write_count(), 0);
}

#[tokio::test]
async fn test_create_quote_with_item_without_materials() {
    let app = setup_app();
    let resp = send(
        &app.router,
        "POST",
        "/orcamentos",
        Some(json!({ "cliente": "Ana", "data": "16/10/2026", "itens": [{ "nome": "Arte" }] })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["descricao"], json!(""));
    assert_eq!(body["itens"][0]["materiais"], json!([]));
}

#[tokio::test]
async fn test_list_quotes_newest_first_with_string_ids() {
    let app = setup_app();
    let material_id = bson::oid::ObjectId::new().to_hex();
    for cliente in ["Primeiro", "Segundo", "Terceiro"] {
        let resp = send(&app.router, "POST", "/orcamentos", Some(quote_body(cliente, &material_id))).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = send(&app.router, "GET", "/orcamentos", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let quotes = body.as_array().unwrap();
    let clientes: Vec<&str> = quotes.iter().map(|q| q["cliente"].as_str().unwrap()).collect();
    assert_eq!(clientes, vec!["Terceiro", "Segundo", "Primeiro"]);

    let created: Vec<&str> = quotes.iter().map(|q| q["createdAt"].as_str().unwrap()).collect();
    assert!(created.windows(2).all(|w| w[0] >= w[1]));

    for quote in quotes {
        assert!(quote["_id"].is_string());
        assert_eq!(nested_ids(quote).len(), 3);
        assert_eq!(quote["itens"][0]["materiais"][0]["materialId"], json!(material_id));
    }
}

#[tokio::test]
async fn test_replace_quote_regenerates_nested_ids() {
    let app = setup_app();
    let material_id = bson::oid::ObjectId::new().to_hex();
    let resp = send(&app.router, "POST", "/orcamentos", Some(quote_body("Ana", &material_id))).await;
    let created = body_json(resp).await;
    let id = created["_id"].as_str().unwrap().to_string();
    let before = nested_ids(&created);

    // send the same ids back, as the frontend does when editing
    let mut edited = created.clone();
    edited["cliente"] = json!("Ana Souza");
    edited["descricao"] = Value::Null;
    let resp = send(&app.router, "PUT", &format!("/orcamentos?id={}", id), Some(edited)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["_id"], json!(id));
    assert_eq!(updated["cliente"], json!("Ana Souza"));
    assert_eq!(updated["descricao"], json!(""));
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);

    let resp = send(&app.router, "GET", "/orcamentos", None).await;
    let listed = body_json(resp).await;
    let after = nested_ids(&listed[0]);
    assert_eq!(after.len(), before.len());
    assert!(before.is_disjoint(&after));
}

#[tokio::test]
async fn test_replace_quote_validation_and_missing_documents() {
    let app = setup_app();
    let material_id = bson::oid::ObjectId::new().to_hex();
    let resp = send(&app.router, "POST", "/orcamentos", Some(quote_body("Ana", &material_id))).await;
    let id = body_json(resp).await["_id"].as_str().unwrap().to_string();
    let writes = app.quotes.write_count();

    let resp = send(
        &app.router,
        "PUT",
        &format!("/orcamentos?id={}", id),
        Some(json!({ "cliente": "Ana", "data": "16/10/2026", "itens": [] })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app.router, "PUT", "/orcamentos?id=xyz", Some(quote_body("Ana", &material_id))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.quotes.write_count(), writes);

    let unknown = bson::oid::ObjectId::new().to_hex();
    let resp = send(&app.router, "PUT", &format!("/orcamentos?id={}", unknown), Some(quote_body("Ana", &material_id))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_quote() {
    let app = setup_app();
    let material_id = bson::oid::ObjectId::new().to_hex();
    let resp = send(&app.router, "POST", "/orcamentos", Some(quote_body("Ana", &material_id))).await;
    let id = body_json(resp).await["_id"].as_str().unwrap().to_string();

    let resp = send(&app.router, "DELETE", "/orcamentos?id=123", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app.router, "DELETE", &format!("/orcamentos?id={}", id), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = send(&app.router, "DELETE", &format!("/orcamentos?id={}", id), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_the_quote_releases_the_material() {
    let app = setup_app();
    let resp = send(&app.router, "POST", "/produtos", Some(common::paper_a4())).await;
    let material_id = body_json(resp).await["_id"].as_str().unwrap().to_string();
    let resp = send(&app.router, "POST", "/orcamentos", Some(quote_body("Ana", &material_id))).await;
    let quote_id = body_json(resp).await["_id"].as_str().unwrap().to_string();

    let resp = send(&app.router, "DELETE", &format!("/produtos?id={}", material_id), None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app.router, "DELETE", &format!("/orcamentos?id={}", quote_id), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app.router, "DELETE", &format!("/produtos?id={}", material_id), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_quote_store_failure_is_internal_error() {
    let app = setup_unreachable_app();
    let resp = send(&app, "GET", "/orcamentos", None).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await, json!({ "message": "Erro ao buscar orçamentos" }));

    let material_id = bson::oid::ObjectId::new().to_hex();
    let resp = send(&app, "POST", "/orcamentos", Some(quote_body("Ana", &material_id))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await, json!({ "message": "Erro ao salvar orçamento" }));

    let uri = format!("/orcamentos?id={}", material_id);
    let resp = send(&app, "PUT", &uri, Some(quote_body("Ana", &material_id))).await;
    assert_eq!(body_json(resp).await, json!({ "message": "Erro ao atualizar orçamento" }));

    let resp = send(&app, "DELETE", &uri, None).await;
    assert_eq!(body_json(resp).await, json!({ "message": "Erro ao deletar orçamento" }));
}
