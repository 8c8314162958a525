use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::models::{CollectionResult, Entity, QueryParams, HREF_FIELD, ID_FIELD};
use crate::domain::ports::ResourceAccessor;
use crate::services::{CachedResource, RestApi, RestResource};

/// Handle list command
pub async fn handle_list(
    api: Arc<RestApi>,
    endpoint: &str,
    params: Vec<(String, String)>,
    json: bool,
) -> Result<()> {
    let resource = RestResource::new(api, endpoint);
    let params: QueryParams = params.into_iter().collect();
    let result = resource
        .list(&params)
        .await
        .with_context(|| format!("Failed to list {endpoint}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(result.as_ref())?);
    } else {
        print_summary(&result);
    }
    Ok(())
}

/// Handle find command
pub async fn handle_find(api: Arc<RestApi>, endpoint: &str, id: &str, json: bool) -> Result<()> {
    let resource = RestResource::new(api, endpoint);
    let entity = resource
        .find(id)
        .await
        .with_context(|| format!("Failed to fetch {endpoint}/{id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entity)?);
    } else {
        println!("{}", entity_line(&entity));
    }
    Ok(())
}

/// Handle resolve command
pub async fn handle_resolve(
    api: Arc<RestApi>,
    endpoint: &str,
    iris: Vec<String>,
    json: bool,
) -> Result<()> {
    let resource = CachedResource::new(Arc::new(RestResource::new(api, endpoint)));
    let resolved = resource
        .resolve_all(iris.clone())
        .await
        .with_context(|| format!("Failed to load {endpoint}"))?;

    for (iri, entity) in iris.iter().zip(resolved) {
        match entity {
            Some(entity) if json => println!("{}", serde_json::to_string_pretty(entity.as_ref())?),
            Some(entity) => println!("{}", entity_line(&entity)),
            None => println!("{iri}\t(not found)"),
        }
    }
    Ok(())
}

/// Handle delete command
pub async fn handle_delete(api: Arc<RestApi>, endpoint: &str, iri: &str) -> Result<()> {
    let entity = Entity::new()
        .with(ID_FIELD, iri)
        .with(HREF_FIELD, api.absolutize(iri));
    let resource = RestResource::new(api, endpoint);
    resource
        .delete(&entity)
        .await
        .with_context(|| format!("Failed to delete {iri}"))?;

    println!("Deleted {iri}");
    Ok(())
}

fn print_summary(result: &CollectionResult) {
    for member in result {
        println!("{}", entity_line(member));
    }
    println!(
        "\nShowing {} of {} item{}",
        result.len(),
        result.total_items,
        if result.total_items == 1 { "" } else { "s" }
    );
    if let Some(next) = result.view.as_ref().and_then(|view| view.next.as_deref()) {
        println!("Next page: {next}");
    }
}

fn entity_line(entity: &Entity) -> String {
    format!(
        "{}\t{}",
        entity.id().unwrap_or("(no @id)"),
        entity.href().unwrap_or("-")
    )
}
