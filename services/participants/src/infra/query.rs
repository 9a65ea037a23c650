//! Select builders for the admin participant listing.
//!
//! Every user-supplied string reaches the statement as a bound value; the
//! builders below only choose columns and operators.

use sea_orm::sea_query::{Condition, Expr, Order, SimpleExpr};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select};

use marathon_core::sea_ext::{ilike_any, ilike_prefix};
use marathon_domain::pagination::PageMode;
use marathon_domain::search::{ParticipantFilter, Relevance, SearchTerms};
use marathon_participants_schema::participants::{Column, Entity};

/// Columns a free-text token may match.
const SEARCHABLE: [Column; 7] = [
    Column::Id,
    Column::BibNum,
    Column::FirstName,
    Column::MiddleName,
    Column::LastName,
    Column::Email,
    Column::PhoneNumber,
];

/// `WHERE` predicate for `filter`: one OR-group per search token, ANDed with
/// the equality filters that are present.
pub fn filter_condition(filter: &ParticipantFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(terms) = &filter.search {
        for token in terms.tokens() {
            cond = cond.add(ilike_any(SEARCHABLE, token));
        }
    }
    if let Some(distance) = &filter.distance {
        cond = cond.add(Column::Distance.eq(distance.as_str()));
    }
    if let Some(size) = &filter.tshirt_size {
        cond = cond.add(Column::TshirtSize.eq(size.as_str()));
    }
    if let Some(given) = filter.is_bib_given {
        cond = cond.add(Column::IsBibGiven.eq(given));
    }
    if let Some(given) = filter.is_tshirt_given {
        cond = cond.add(Column::IsTshirtGiven.eq(given));
    }
    cond
}

/// `CASE` expression yielding the [`Relevance`] rank of a row for `terms`.
pub fn relevance_expr(terms: &SearchTerms) -> SimpleExpr {
    let raw = terms.raw();
    let name_prefix = Condition::any()
        .add(ilike_prefix(Column::FirstName, raw))
        .add(ilike_prefix(Column::LastName, raw));
    Expr::case(Column::BibNum.eq(raw), Relevance::ExactBib.rank())
        .case(ilike_prefix(Column::BibNum, raw), Relevance::BibPrefix.rank())
        .case(name_prefix, Relevance::NamePrefix.rank())
        .finally(Relevance::Other.rank())
        .into()
}

/// Ranked (when searching), newest-first listing. The id breaks ties so
/// pages never overlap.
pub fn search_select(filter: &ParticipantFilter, mode: PageMode) -> Select<Entity> {
    let mut select = count_select(filter);
    if let Some(terms) = &filter.search {
        select = select.order_by(relevance_expr(terms), Order::Asc);
    }
    select = select
        .order_by_desc(Column::CreatedAt)
        .order_by_asc(Column::Id);
    if let PageMode::Paged(page) = mode {
        select = select.offset(page.offset()).limit(u64::from(page.limit));
    }
    select
}

/// Same predicate as [`search_select`], without ordering or pagination.
pub fn count_select(filter: &ParticipantFilter) -> Select<Entity> {
    Entity::find().filter(filter_condition(filter))
}
