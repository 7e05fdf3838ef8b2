use crate::api::SearchParams;
use crate::api::validation::parse_search_params;
use crate::cli::SearchArgs;
use crate::state::SharedState;

pub async fn cmd_search(state: &SharedState, args: SearchArgs) -> anyhow::Result<()> {
    let text = args.query.join(" ");
    let params = SearchParams {
        query: Some(text.clone()),
        rarity: args.rarity,
        set_code: args.set_code,
        colors: args.colors,
        order_by: args.order_by,
        order_dir: args.desc.then(|| "DESC".to_string()),
        page: args.page,
    };

    let query = parse_search_params(&params)?;
    let page = query.page;
    let results = state.search_service.search(&query).await?;

    if results.cards.is_empty() {
        if text.trim().is_empty() {
            println!("No cards matched the given filters");
        } else {
            println!("No cards found matching '{}'", text.trim());
        }
        return Ok(());
    }

    println!(
        "Page {} of {} ({} matching printings)",
        page.value(),
        results.total_pages,
        results.total_count
    );
    println!("{:-<72}", "");

    for card in &results.cards {
        let price = card
            .price_usd
            .map_or_else(|| "-".to_string(), |p| format!("${p:.2}"));
        println!(
            "{:<36} {:<6} {:<9} {:>8}  {}",
            card.name,
            card.set_code.to_uppercase(),
            card.rarity,
            price,
            card.id
        );
    }

    if page.value() < results.total_pages {
        println!();
        println!("More results: add --page {}", page.value() + 1);
    }

    Ok(())
}
