use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use realty_core::catalog::{self, StatusFilter};
use realty_core::format::{capitalize, format_price_display, format_timestamp};
use realty_core::models::property::parse_amenities;
use realty_core::models::{Property, PropertyDraft, PropertyStatus, PropertyType};

use crate::context::Context;
use crate::input;

#[derive(Subcommand)]
pub enum PropertyCommand {
    /// List listings (public)
    List(ListArgs),
    /// Show one listing with its opening loan quote (public)
    Show(IdArg),
    /// Create a listing (admin)
    Create(DraftArgs),
    /// Update a listing; unspecified fields keep their current value (admin)
    Update(UpdateArgs),
    /// Delete a listing (admin)
    Delete(IdArg),
}

#[derive(Args)]
pub struct ListArgs {
    /// Status filter: all, ongoing, completed, upcoming
    #[arg(long, default_value = "ongoing")]
    pub status: StatusFilter,

    /// Case-insensitive text search across the listing's fields
    #[arg(long)]
    pub search: Option<String>,

    /// Order rows by category
    #[arg(long)]
    pub group: bool,
}

#[derive(Args)]
pub struct IdArg {
    pub id: String,
}

#[derive(Args, Default)]
pub struct DraftArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    /// villa, land, commercial
    #[arg(long = "type")]
    pub property_type: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,

    #[arg(long)]
    pub features: Option<String>,

    /// Comma-separated amenities
    #[arg(long)]
    pub amenities: Option<String>,

    /// completed, ongoing, upcoming
    #[arg(long)]
    pub status: Option<String>,

    /// Image URL; repeat for several
    #[arg(long = "image")]
    pub images: Vec<String>,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub id: String,

    #[command(flatten)]
    pub draft: DraftArgs,
}

/// One line of the listings table.
#[derive(Debug, Serialize)]
struct PropertyRow {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    category: String,
    location: String,
    price: String,
    status: String,
    updated: String,
}

impl From<&Property> for PropertyRow {
    fn from(p: &Property) -> Self {
        Self {
            id: p.id.clone(),
            title: p.title.clone(),
            category: capitalize(&p.type_key()),
            location: p.location.clone(),
            price: format_price_display(p.price.as_ref()),
            status: capitalize(&p.status_key()),
            updated: format_timestamp(p.updated_at.as_deref().or(p.created_at.as_deref())),
        }
    }
}

pub fn run_property(cmd: PropertyCommand, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    match cmd {
        PropertyCommand::List(args) => run_list(args, ctx),
        PropertyCommand::Show(args) => run_show(&args.id, ctx),
        PropertyCommand::Create(args) => run_create(args, ctx),
        PropertyCommand::Update(args) => run_update(args, ctx),
        PropertyCommand::Delete(args) => {
            let client = ctx.admin_client()?;
            let reply = client.delete_property(&args.id)?;
            tracing::info!(id = %args.id, "listing deleted");
            Ok(serde_json::to_value(reply)?)
        }
    }
}

fn run_list(args: ListArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let all = ctx.public_client()?.list_properties()?;
    let rows = list_rows(&all, &args);
    tracing::debug!(fetched = all.len(), shown = rows.len(), "listings");
    Ok(serde_json::to_value(rows)?)
}

fn list_rows(all: &[Property], args: &ListArgs) -> Vec<PropertyRow> {
    let mut shown = catalog::filter_by_status(all, &args.status);
    if let Some(q) = args.search.as_deref() {
        shown = catalog::search_properties(&shown, q);
    }
    if args.group {
        shown = catalog::group_by_type(&shown)
            .into_iter()
            .flat_map(|g| g.properties)
            .collect();
    }
    shown.iter().map(PropertyRow::from).collect()
}

fn run_show(id: &str, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let property = ctx.public_client()?.get_property(id)?;
    detail_value(&property)
}

fn detail_value(property: &Property) -> Result<Value, Box<dyn std::error::Error>> {
    let quote = super::emi::quote_value(&property.emi_calculator().quote_output())?;
    let mut value = serde_json::to_value(property)?;
    if let Value::Object(map) = &mut value {
        map.insert(
            "price_display".into(),
            format_price_display(property.price.as_ref()).into(),
        );
        map.insert(
            "created".into(),
            format_timestamp(property.created_at.as_deref()).into(),
        );
        map.insert(
            "updated".into(),
            format_timestamp(property.updated_at.as_deref()).into(),
        );
        map.insert("emi".into(), quote);
    }
    Ok(value)
}

fn run_create(args: DraftArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let client = ctx.admin_client()?;
    let draft = match input::load_payload::<PropertyDraft>(args.input.as_deref())? {
        Some(draft) => draft,
        None => apply_flags(blank_draft(), args),
    }
    .validate()?;

    let created = client.create_property(&draft)?;
    tracing::info!(id = %created.id, title = %created.title, "listing created");
    Ok(serde_json::to_value(created)?)
}

fn run_update(args: UpdateArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let client = ctx.admin_client()?;
    let draft = match input::load_payload::<PropertyDraft>(args.draft.input.as_deref())? {
        Some(draft) => draft,
        None => {
            let current = client.get_property(&args.id)?;
            apply_flags(PropertyDraft::from(&current), args.draft)
        }
    }
    .validate()?;

    let updated = client.update_property(&args.id, &draft)?;
    tracing::info!(id = %args.id, "listing updated");
    Ok(serde_json::to_value(updated)?)
}

/// The create form's opening state.
fn blank_draft() -> PropertyDraft {
    PropertyDraft {
        title: String::new(),
        property_type: PropertyType::Villa,
        location: String::new(),
        price: String::new(),
        features: String::new(),
        amenities: Vec::new(),
        status: PropertyStatus::Completed,
        images: Vec::new(),
    }
}

fn apply_flags(mut draft: PropertyDraft, args: DraftArgs) -> PropertyDraft {
    if let Some(v) = args.title {
        draft.title = v;
    }
    if let Some(v) = args.property_type {
        draft.property_type = PropertyType::from(v);
    }
    if let Some(v) = args.location {
        draft.location = v;
    }
    if let Some(v) = args.price {
        draft.price = v;
    }
    if let Some(v) = args.features {
        draft.features = v;
    }
    if let Some(v) = args.amenities {
        draft.amenities = parse_amenities(&v);
    }
    if let Some(v) = args.status {
        draft.status = PropertyStatus::from(v);
    }
    if !args.images.is_empty() {
        draft.images = args.images;
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listings() -> Vec<Property> {
        serde_json::from_value(json!([
            {"_id": "1", "title": "Palm Villa", "type": "Villa", "status": "ongoing",
             "location": "Kochi", "price": "₹75,00,000", "updatedAt": "2024-03-05T14:07:09.000Z"},
            {"_id": "2", "title": "Market Plot", "type": "land", "status": "Completed",
             "location": "Thrissur", "price": 1200000},
            {"_id": "3", "title": "Harbour Office", "type": "commercial", "status": "ongoing",
             "location": "Kochi"}
        ]))
        .unwrap()
    }

    fn list_args(status: StatusFilter) -> ListArgs {
        ListArgs {
            status,
            search: None,
            group: false,
        }
    }

    #[test]
    fn test_default_list_shows_ongoing() {
        let rows = list_rows(&listings(), &list_args(StatusFilter::default()));
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(rows[0].price, "₹75,00,000");
        assert_eq!(rows[0].updated, "05/03/2024, 14:07:09");
        assert_eq!(rows[1].price, "-");
    }

    #[test]
    fn test_grouped_search() {
        let mut args = list_args(StatusFilter::All);
        args.search = Some("kochi".into());
        args.group = true;
        let rows = list_rows(&listings(), &args);
        let cats: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(cats, ["Commercial", "Villa"]);
    }

    #[test]
    fn test_detail_carries_opening_quote() {
        let value = detail_value(&listings()[0]).unwrap();
        assert_eq!(value["price_display"], "₹75,00,000");
        assert_eq!(value["emi"]["result"]["monthly_installment"], "95007");
        assert_eq!(value["emi"]["result"]["tenure_months"], 120);
        assert_eq!(value["emi"]["warnings"], json!([]));
    }

    #[test]
    fn test_detail_without_price_warns() {
        let all = listings();
        let value = detail_value(&all[2]).unwrap();
        assert_eq!(value["price_display"], "-");
        assert_eq!(value["emi"]["result"]["monthly_installment"], "0");
        assert_eq!(value["emi"]["warnings"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_flags_override_prefill() {
        let all = listings();
        let current = &all[1];
        let args = DraftArgs {
            amenities: Some("Water, Road access\nFence".into()),
            status: Some("ongoing".into()),
            ..DraftArgs::default()
        };
        let draft = apply_flags(PropertyDraft::from(current), args).validate().unwrap();
        assert_eq!(draft.title, "Market Plot");
        assert_eq!(draft.price, "1200000");
        assert_eq!(draft.amenities, ["Water", "Road access", "Fence"]);
        assert_eq!(draft.status, PropertyStatus::Ongoing);
    }

    #[test]
    fn test_blank_draft_rejected() {
        let err = apply_flags(blank_draft(), DraftArgs::default())
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("Title is required"));
    }
}
