use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, warn};

use super::models::{AppState, MessageResponse, NewTxRequest, PendingResponse};

/// Submit a new transaction into the pending pool.
#[post("/transactions/new")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let Some(tx) = body.into_inner().into_transaction() else {
        warn!("POST /transactions/new - rejected: missing fields");
        return HttpResponse::BadRequest().body("Missing values");
    };

    debug!(
        "POST /transactions/new - {} -> {} ({})",
        tx.sender, tx.recipient, tx.amount
    );
    let index = state.ledger.add_transaction(tx);

    HttpResponse::Created().json(MessageResponse {
        message: format!("Transaction will be added to block {index}"),
    })
}

/// List the transactions waiting for the next block.
#[get("/transactions/pending")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let pending = state.ledger.pending();
    HttpResponse::Ok().json(PendingResponse {
        size: pending.len(),
        transactions: pending,
    })
}
