use crate::api::validation::validate_printing_id;
use crate::domain::ColorCode;
use crate::services::SearchError;
use crate::state::SharedState;

pub async fn cmd_card(state: &SharedState, id: &str) -> anyhow::Result<()> {
    let id = validate_printing_id(id)?;

    let card = match state.search_service.get_card(id).await {
        Ok(card) => card,
        Err(SearchError::NotFound(_)) => {
            println!("Card not found: {id}");
            println!("Use 'binderdex search <name>' to find printing IDs");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", card.name);
    println!("{:-<60}", "");
    if let Some(cost) = &card.mana_cost {
        println!("Mana cost: {cost} (MV {})", card.mana_value);
    }
    println!("Type:      {}", card.type_line);
    println!(
        "Set:       {} ({}) #{}",
        card.set_name,
        card.set_code.to_uppercase(),
        card.collector_number
    );
    println!("Rarity:    {}", card.rarity);

    if !card.colors.is_empty() {
        let colors: Vec<&str> = card.colors.iter().map(ColorCode::as_code).collect();
        println!("Colors:    {}", colors.join(", "));
    }

    match (card.price_usd, card.price_usd_foil) {
        (Some(price), Some(foil)) => println!("Price:     ${price:.2} (foil ${foil:.2})"),
        (Some(price), None) => println!("Price:     ${price:.2}"),
        (None, Some(foil)) => println!("Price:     foil ${foil:.2}"),
        (None, None) => {}
    }

    if let Some(text) = &card.oracle_text {
        println!();
        println!("{text}");
    }

    if !card.other_printings.is_empty() {
        println!();
        println!("Other printings:");
        for printing in &card.other_printings {
            println!(
                "  • {} ({}) #{} {} [{}]",
                printing.set_name,
                printing.set_code.to_uppercase(),
                printing.collector_number,
                printing.rarity,
                printing.id
            );
        }
    }

    Ok(())
}
