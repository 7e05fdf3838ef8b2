use crate::domain::SortOrder;
use crate::domain::search::{
    FUZZY_LIMIT, FilterFragment, FuzzyQuery, PAGE_SIZE, SearchQuery, SortKey, total_pages,
};
use crate::entities::{card_design_colors, card_designs, card_printings, card_sets, prelude::*};
use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, LikeExpr, NullOrdering, Query, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use serde::Serialize;

/// One row of a search result page.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct CardSummary {
    pub id: String,
    pub name: String,
    pub set_name: String,
    pub set_code: String,
    pub rarity: String,
    pub image_uri_normal: Option<String>,
    pub price_usd: Option<f64>,
}

/// One typeahead suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct CardSuggestion {
    pub id: String,
    pub name: String,
    pub image_uri_small: Option<String>,
    pub set_name: String,
    pub set_code: String,
    pub price_usd: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub cards: Vec<CardSummary>,
    pub total_count: u64,
    pub total_pages: u64,
}

/// Composes catalog searches over `card_printings ⋈ card_designs ⋈ card_sets`.
pub struct CardSearchRepository {
    conn: DatabaseConnection,
}

impl CardSearchRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Runs the count and page queries concurrently. Both are derived from the
    /// same filtered select, so the total and the page can never disagree on
    /// which rows match.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let fragments = query.fragments();
        let base = filtered(&fragments);
        let window = query.window();

        let count = base.clone().count(&self.conn);

        let page = sorted(summary_columns(base), query.sort, query.order)
            .limit(window.limit)
            .offset(window.offset)
            .into_model::<CardSummary>()
            .all(&self.conn);

        let (total_count, cards) = futures::try_join!(count, page)
            .context("Failed to execute card search")?;

        Ok(SearchPage {
            cards,
            total_count,
            total_pages: total_pages(total_count, PAGE_SIZE),
        })
    }

    /// Name-only lookup, ascending by name, capped at [`FUZZY_LIMIT`] rows.
    pub async fn suggest(&self, query: &FuzzyQuery) -> Result<Vec<CardSuggestion>> {
        let fragments = [FilterFragment::NameContains(query.as_str().to_string())];

        let rows = sorted(
            suggestion_columns(filtered(&fragments)),
            SortKey::Name,
            SortOrder::Ascending,
        )
        .limit(FUZZY_LIMIT)
        .into_model::<CardSuggestion>()
        .all(&self.conn)
        .await
        .context("Failed to execute fuzzy card search")?;

        Ok(rows)
    }
}

/// Joined printings/designs/sets restricted by every fragment (AND).
pub(crate) fn filtered(fragments: &[FilterFragment]) -> Select<CardPrintings> {
    let select = CardPrintings::find()
        .join(
            JoinType::InnerJoin,
            card_printings::Relation::CardDesigns.def(),
        )
        .join(JoinType::InnerJoin, card_printings::Relation::CardSets.def());

    if fragments.is_empty() {
        return select;
    }

    let condition = fragments
        .iter()
        .fold(Condition::all(), |cond, fragment| {
            cond.add(fragment_expr(fragment))
        });

    select.filter(condition)
}

/// Lowers one fragment into a sea-query expression. Every user value is bound
/// as a parameter.
pub(crate) fn fragment_expr(fragment: &FilterFragment) -> SimpleExpr {
    match fragment {
        // SQLite's LOWER only folds ASCII, so both sides are folded in Rust.
        FilterFragment::NameContains(text) => {
            let pattern = format!("%{}%", escape_like(&text.to_lowercase()));
            Expr::col((CardDesigns, card_designs::Column::NameFolded))
                .like(LikeExpr::new(pattern).escape('\\'))
        }
        FilterFragment::Rarity(rarity) => card_printings::Column::Rarity.eq(rarity.as_str()),
        FilterFragment::SetCode(code) => card_printings::Column::SetCode.eq(code.as_str()),
        FilterFragment::AnyColor(colors) => Expr::exists(
            Query::select()
                .expr(Expr::val(1))
                .from(CardDesignColors)
                .and_where(
                    Expr::col((CardDesignColors, card_design_colors::Column::DesignId))
                        .equals((CardDesigns, card_designs::Column::Id)),
                )
                .and_where(
                    Expr::col((CardDesignColors, card_design_colors::Column::Color))
                        .is_in(colors.iter().map(|c| c.as_code())),
                )
                .to_owned(),
        ),
    }
}

/// Applies the closed sort mapping. Ties fall back to the printing id in the
/// same direction and NULL prices trail ascending / lead descending, so the
/// descending sequence is always the exact reverse of the ascending one.
pub(crate) fn sorted(
    select: Select<CardPrintings>,
    key: SortKey,
    order: SortOrder,
) -> Select<CardPrintings> {
    let direction = if order.is_ascending() {
        Order::Asc
    } else {
        Order::Desc
    };

    let select = match key {
        SortKey::Name => select.order_by(card_designs::Column::Name, direction.clone()),
        SortKey::Price => {
            let nulls = if order.is_ascending() {
                NullOrdering::Last
            } else {
                NullOrdering::First
            };
            select.order_by_with_nulls(
                card_printings::Column::PriceUsd,
                direction.clone(),
                nulls,
            )
        }
    };

    select.order_by(card_printings::Column::Id, direction)
}

fn summary_columns(select: Select<CardPrintings>) -> Select<CardPrintings> {
    select
        .select_only()
        .column_as(card_printings::Column::Id, "id")
        .column_as(card_designs::Column::Name, "name")
        .column_as(card_sets::Column::Name, "set_name")
        .column_as(card_printings::Column::SetCode, "set_code")
        .column_as(card_printings::Column::Rarity, "rarity")
        .column_as(card_printings::Column::ImageUriNormal, "image_uri_normal")
        .column_as(card_printings::Column::PriceUsd, "price_usd")
}

fn suggestion_columns(select: Select<CardPrintings>) -> Select<CardPrintings> {
    select
        .select_only()
        .column_as(card_printings::Column::Id, "id")
        .column_as(card_designs::Column::Name, "name")
        .column_as(card_printings::Column::ImageUriSmall, "image_uri_small")
        .column_as(card_sets::Column::Name, "set_name")
        .column_as(card_printings::Column::SetCode, "set_code")
        .column_as(card_printings::Column::PriceUsd, "price_usd")
}

/// Escapes LIKE wildcards so user text matches literally (escape char `\`).
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColorCode, Rarity};
    use sea_orm::{DbBackend, QueryTrait};

    fn render(select: Select<CardPrintings>) -> String {
        select.build(DbBackend::Sqlite).to_string()
    }

    #[test]
    fn escape_like_handles_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("bolt"), "bolt");
    }

    #[test]
    fn unfiltered_select_has_no_where_clause() {
        let sql = render(filtered(&[]));
        assert!(sql.contains("INNER JOIN \"card_designs\""));
        assert!(sql.contains("INNER JOIN \"card_sets\""));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn name_fragment_is_case_insensitive_like() {
        let sql = render(filtered(&[FilterFragment::NameContains(
            "Bolt".to_string(),
        )]));
        assert!(sql.contains("\"card_designs\".\"name_folded\" LIKE '%bolt%'"));
        assert!(sql.contains("ESCAPE"));
    }

    #[test]
    fn name_fragment_folds_non_ascii_text() {
        let sql = render(filtered(&[FilterFragment::NameContains(
            "ÆTHER".to_string(),
        )]));
        assert!(sql.contains("\"name_folded\" LIKE '%æther%'"));
    }

    #[test]
    fn color_fragment_is_an_exists_any_of() {
        let colors = [ColorCode::Blue, ColorCode::Green].into_iter().collect();
        let sql = render(filtered(&[FilterFragment::AnyColor(colors)]));
        assert!(sql.contains("EXISTS"));
        assert!(sql.contains("FROM \"card_design_colors\""));
        assert!(sql.contains("\"card_design_colors\".\"color\" IN ('U', 'G')"));
    }

    #[test]
    fn fragments_are_and_combined() {
        let sql = render(filtered(&[
            FilterFragment::Rarity(Rarity::Mythic),
            FilterFragment::SetCode("lea".to_string()),
        ]));
        assert!(sql.contains(
            "\"card_printings\".\"rarity\" = 'mythic' AND \"card_printings\".\"set_code\" = 'lea'"
        ));
    }

    #[test]
    fn price_sort_places_nulls_consistently() {
        let asc = render(sorted(filtered(&[]), SortKey::Price, SortOrder::Ascending));
        let desc = render(sorted(filtered(&[]), SortKey::Price, SortOrder::Descending));
        assert!(asc.contains("\"price_usd\" ASC NULLS LAST"));
        assert!(desc.contains("\"price_usd\" DESC NULLS FIRST"));
        assert!(asc.ends_with("\"card_printings\".\"id\" ASC"));
        assert!(desc.ends_with("\"card_printings\".\"id\" DESC"));
    }
}
