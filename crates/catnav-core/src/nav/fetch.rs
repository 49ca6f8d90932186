//! Running navigator requests against a [`CatalogService`].

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::catalog::CatalogService;
use crate::nav::navigator::{Reply, Request, Response};

/// Performs `request` and pairs the result with its ticket.
pub async fn execute(service: &dyn CatalogService, request: Request) -> Reply {
    let ticket = request.ticket();
    let response = match request {
        Request::ListChildren { path, options, .. } => {
            Response::Children(service.list_children(&path, &options).await)
        }
        Request::Search {
            params, options, ..
        } => Response::Hits(service.search(&params, &options).await),
        Request::ResolvePath {
            catalog_id,
            node_key,
            ..
        } => Response::Path(service.resolve_path(&catalog_id, &node_key).await),
    };
    Reply { ticket, response }
}

/// Runs `request` on a background task and sends the reply to `tx`.
///
/// Replies arrive in completion order, not request order; the navigator
/// sorts that out by ticket.
pub fn spawn_fetch(
    service: Arc<dyn CatalogService>,
    request: Request,
    tx: mpsc::UnboundedSender<Reply>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let generation = request.ticket().generation();
        let reply = execute(service.as_ref(), request).await;
        if tx.send(reply).is_err() {
            tracing::debug!(generation, "reply receiver dropped");
        }
    })
}
