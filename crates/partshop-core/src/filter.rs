// ── Catalog filter → backend query translation ──
//
// The frontend filter is a flat bag of optional fields. Each set field maps
// to exactly one backend query parameter; unset fields are omitted. Paging
// is 1-based here and 0-based on the wire.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use partshop_api::{Error, FieldErrors};

/// Page size used when the caller does not set one.
pub const DEFAULT_LIMIT: u32 = 20;

/// Declares `ProductFilter` and its one-field-per-parameter mapping in one
/// place, so a field can never exist without its query parameter.
macro_rules! product_filter {
    ($( $(#[$meta:meta])* $field:ident : $ty:ty => $param:literal ),+ $(,)?) => {
        /// Catalog search filter, in frontend terms.
        ///
        /// `page` is 1-based. `sort` takes the frontend sort keys
        /// (`price_asc`, `price_desc`, `name_asc`, `name_desc`, `newest`).
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct ProductFilter {
            pub page: Option<u32>,
            pub limit: Option<u32>,
            pub sort: Option<String>,
            $( $(#[$meta])* pub $field: Option<$ty>, )+
        }

        impl ProductFilter {
            fn push_filters(&self, out: &mut Vec<(String, String)>) {
                $(
                    if let Some(value) = &self.$field {
                        out.push(($param.to_owned(), value.to_string()));
                    }
                )+
            }

            /// Backend parameter names for every filter field, in order.
            pub fn parameter_names() -> &'static [&'static str] {
                &[$($param),+]
            }

            /// Set one filter by backend parameter name from its text form.
            ///
            /// Fails with a 400-status validation error for unknown names
            /// and unparseable values; the filter is left unchanged then.
            pub fn set_param(&mut self, param: &str, raw: &str) -> Result<(), Error> {
                match param {
                    $(
                        $param => {
                            let value = raw.trim().parse::<$ty>().map_err(|e| {
                                invalid_param(param, &format!("cannot parse '{raw}': {e}"))
                            })?;
                            self.$field = Some(value);
                        }
                    )+
                    _ => return Err(invalid_param(param, "unknown filter parameter")),
                }
                Ok(())
            }
        }
    };
}

product_filter! {
    // ── Generic commerce ─────────────────────────────────────────────
    search: String => "search",
    category_id: i64 => "categoryId",
    category_slug: String => "categorySlug",
    root_category_id: i64 => "rootCategoryId",
    brand: String => "brand",
    condition: String => "condition",
    min_price: Decimal => "minPrice",
    max_price: Decimal => "maxPrice",
    in_stock: bool => "inStock",
    featured: bool => "featured",
    on_sale: bool => "onSale",
    quote_only: bool => "quoteOnly",
    currency: String => "currency",

    // ── Vehicles ─────────────────────────────────────────────────────
    make: String => "make",
    model: String => "model",
    variant: String => "variant",
    year_from: i32 => "yearFrom",
    year_to: i32 => "yearTo",
    mileage_min: i64 => "mileageMin",
    mileage_max: i64 => "mileageMax",
    fuel_type: String => "fuelType",
    transmission: String => "transmission",
    drivetrain: String => "drivetrain",
    body_type: String => "bodyType",
    engine_size_min: Decimal => "engineSizeMin",
    engine_size_max: Decimal => "engineSizeMax",
    power_min: i32 => "powerMin",
    power_max: i32 => "powerMax",
    exterior_color: String => "exteriorColor",
    doors: i32 => "doors",
    seats: i32 => "seats",
    emission_class: String => "emissionClass",
    accident_free: bool => "accidentFree",

    // ── Parts ────────────────────────────────────────────────────────
    part_type: String => "partType",
    part_number: String => "partNumber",
    oem_number: String => "oemNumber",
    compatible_make: String => "compatibleMake",
    compatible_model: String => "compatibleModel",
    compatible_year: i32 => "compatibleYear",
    mounting_position: String => "mountingPosition",
    material: String => "material",
    wheel_diameter: Decimal => "wheelDiameter",
    wheel_width: Decimal => "wheelWidth",
    bolt_pattern: String => "boltPattern",
    wheel_offset: i32 => "wheelOffset",
    center_bore: Decimal => "centerBore",
    tire_size: String => "tireSize",
    tire_season: String => "tireSeason",
    load_index: i32 => "loadIndex",
    speed_rating: String => "speedRating",

    // ── Tools ────────────────────────────────────────────────────────
    tool_type: String => "toolType",
    power_source: String => "powerSource",
    voltage: i32 => "voltage",
    drive_size: String => "driveSize",
    cordless: bool => "cordless",

    // ── Custom work ──────────────────────────────────────────────────
    service_type: String => "serviceType",
    finish: String => "finish",
    max_lead_time_days: i32 => "maxLeadTimeDays",
}

fn invalid_param(param: &str, reason: &str) -> Error {
    let mut field_errors = FieldErrors::new();
    field_errors.insert(param.to_owned(), reason.to_owned());
    Error::Validation {
        message: format!("Invalid filter '{param}': {reason}"),
        field_errors,
    }
}

/// Backend `(sortBy, sortDir)` for a frontend sort key.
///
/// Unknown and absent keys sort by creation date, descending only when the
/// key itself ends in `_desc`.
pub fn sort_params(key: Option<&str>) -> (&'static str, &'static str) {
    match key.map(str::trim) {
        Some("price_asc") => ("price", "asc"),
        Some("price_desc") => ("price", "desc"),
        Some("name_asc") => ("name", "asc"),
        Some("name_desc") => ("name", "desc"),
        Some("newest") => ("createdDate", "desc"),
        Some(other) if other.ends_with("_desc") => ("createdDate", "desc"),
        _ => ("createdDate", "asc"),
    }
}

impl ProductFilter {
    /// 1-based page, never below 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).max(1)
    }

    /// Full backend query: filters, then `page` (0-based), `size`,
    /// `sortBy`, `sortDir`.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.push_filters(&mut out);

        let (sort_by, sort_dir) = sort_params(self.sort.as_deref());
        out.push(("page".to_owned(), (self.page() - 1).to_string()));
        out.push(("size".to_owned(), self.limit().to_string()));
        out.push(("sortBy".to_owned(), sort_by.to_owned()));
        out.push(("sortDir".to_owned(), sort_dir.to_owned()));
        out
    }
}
