use crate::state::SharedState;

pub async fn cmd_sets(state: &SharedState) -> anyhow::Result<()> {
    let sets = state.search_service.list_sets().await?;

    if sets.is_empty() {
        println!("The catalog has no sets yet.");
        return Ok(());
    }

    println!("{:<8} {:<40} {:<12} {:>6}", "Code", "Name", "Released", "Cards");
    println!("{:-<70}", "");

    for set in &sets {
        println!(
            "{:<8} {:<40} {:<12} {:>6}",
            set.code.to_uppercase(),
            set.name,
            set.released_at.as_deref().unwrap_or("-"),
            set.printing_count
        );
    }

    Ok(())
}
