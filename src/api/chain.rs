use actix_web::{HttpResponse, Responder, get, web};
use log::{error, info, warn};
use std::time::Instant;

use super::models::{AppState, ChainResponse, MineResponse, ValidateResponse};
use crate::blockchain::CancelToken;

/// Get the full blockchain.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let chain = state.ledger.chain();
    HttpResponse::Ok().json(ChainResponse {
        length: chain.len(),
        chain,
    })
}

/// Validate the whole chain.
#[get("/chain/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ValidateResponse {
        valid: state.ledger.is_valid_chain(),
        length: state.ledger.len(),
    })
}

/// Mine a new block from the pending pool:
/// - Solve the proof against the tip's proof (blocking pool, no ledger lock)
/// - Append the reward for this node
/// - Seal the pool into the block
///
/// If the client goes away, the dropped request cancels the search.
#[get("/mine")]
pub async fn mine(state: web::Data<AppState>) -> impl Responder {
    let t0 = Instant::now();
    let cancel = CancelToken::new();
    let abort_on_drop = cancel.drop_guard();

    let worker = state.clone();
    let result = web::block(move || worker.ledger.mine(&worker.node_id, &cancel)).await;
    abort_on_drop.disarm();

    match result {
        Ok(Ok(block)) => {
            info!(
                "GET /mine - block #{} forged ({} ms)",
                block.index,
                t0.elapsed().as_millis()
            );
            HttpResponse::Ok().json(MineResponse {
                message: "New Block Forged".to_string(),
                index: block.index,
                transaction: block.transactions,
                proof: block.proof,
                previous_hash: block.previous_hash,
            })
        }
        Ok(Err(e)) => {
            warn!("GET /mine - {e}");
            HttpResponse::ServiceUnavailable().body(e.to_string())
        }
        Err(e) => {
            error!("GET /mine - mining task failed: {e}");
            HttpResponse::InternalServerError().body("mining task failed")
        }
    }
}
