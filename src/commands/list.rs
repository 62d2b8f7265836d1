//! List every post in the repository

use anyhow::Result;

use crate::cms::{ContentSource, Ordering, Predicate, PrismicClient, QueryOptions, SortKey, SortOrder};
use crate::content::PostSummary;
use crate::pagination::PaginationState;
use crate::Publica;

/// Print all posts, draining the paged query page by page.
pub async fn run(app: &Publica) -> Result<()> {
    let client = PrismicClient::new(&app.config)?;

    let predicate = Predicate::at("document.type", &app.config.document_type);
    let options = QueryOptions {
        page_size: app.config.per_page,
        orderings: Some(Ordering::new(
            SortKey::LastPublicationDate,
            SortOrder::Desc,
        )),
        after: None,
    };

    let response = client.query(&predicate, &options).await?;
    let first_page = response.page;

    let mut posts = Vec::with_capacity(response.results.len());
    for raw in response.results {
        posts.push(PostSummary::from_raw(raw, &app.config)?);
    }

    let mut state = PaginationState::new(posts, response.next_page, first_page);

    while state.has_more() {
        state.load_next_page(&client, &app.config).await?;
    }

    println!("Posts ({}):", state.items.len());
    for post in &state.items {
        println!(
            "  {} - {} [{}]",
            post.display_date.as_deref().unwrap_or("unpublished"),
            post.title,
            post.tags.join(", ")
        );
    }

    Ok(())
}
