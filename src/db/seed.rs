//! Demo fixture: three accounts, six realtors, six listings across
//! Illinois and Wisconsin. Safe to run on every startup: accounts are
//! created only when their email is absent, and the listing tables are
//! populated only when empty.

use anyhow::Result;
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use tracing::info;
use uuid::Uuid;

use super::Store;
use crate::entities::{prelude::*, properties, property_features, property_images, realtors};

const DEMO_USERS: [(&str, &str, &str); 3] = [
    ("buyer@trusteze.com", "Blake Carter", "Buyer"),
    ("investor@trusteze.com", "Iris Nakamura", "Investor"),
    ("admin@trusteze.com", "Avery Morgan", "Admin"),
];

struct SeedRealtor {
    name: &'static str,
    phone: &'static str,
    email: &'static str,
    company: &'static str,
    license_number: &'static str,
}

const DEMO_REALTORS: [SeedRealtor; 6] = [
    SeedRealtor {
        name: "Sarah Johnson",
        phone: "(217) 555-0134",
        email: "sarah.johnson@premierrealty.com",
        company: "Premier Realty",
        license_number: "IL-471-002134",
    },
    SeedRealtor {
        name: "Michael Chen",
        phone: "(312) 555-0187",
        email: "michael.chen@lakeshorehomes.com",
        company: "Lakeshore Homes",
        license_number: "IL-471-005562",
    },
    SeedRealtor {
        name: "Emily Rodriguez",
        phone: "(847) 555-0119",
        email: "emily.rodriguez@northshoregroup.com",
        company: "North Shore Group",
        license_number: "IL-471-008821",
    },
    SeedRealtor {
        name: "David Okafor",
        phone: "(630) 555-0152",
        email: "david.okafor@heartlandproperties.com",
        company: "Heartland Properties",
        license_number: "IL-471-009348",
    },
    SeedRealtor {
        name: "Lisa Thompson",
        phone: "(262) 555-0178",
        email: "lisa.thompson@genevashores.com",
        company: "Geneva Shores Realty",
        license_number: "WI-56-044210",
    },
    SeedRealtor {
        name: "James Wilson",
        phone: "(414) 555-0163",
        email: "james.wilson@urbanlivingrealty.com",
        company: "Urban Living Realty",
        license_number: "WI-56-051877",
    },
];

struct SeedProperty {
    title: &'static str,
    description: &'static str,
    price: f64,
    address: &'static str,
    city: &'static str,
    state: &'static str,
    zip_code: &'static str,
    bedrooms: i32,
    bathrooms: f64,
    square_feet: i32,
    lot_size: Option<f64>,
    year_built: Option<i32>,
    property_type: &'static str,
    days_on_market: i64,
    realtor_index: usize,
    images: &'static [&'static str],
    features: &'static [&'static str],
}

const DEMO_PROPERTIES: [SeedProperty; 6] = [
    SeedProperty {
        title: "Spacious Family Home with Large Backyard",
        description: "Beautifully maintained two-story home on a quiet \
                      tree-lined street, with an updated kitchen, finished \
                      basement, and a fenced backyard.",
        price: 450_000.0,
        address: "1425 Oakwood Drive",
        city: "Springfield",
        state: "IL",
        zip_code: "62704",
        bedrooms: 4,
        bathrooms: 3.0,
        square_feet: 2500,
        lot_size: Some(0.35),
        year_built: Some(1998),
        property_type: "house",
        days_on_market: 30,
        realtor_index: 0,
        images: &[
            "https://images.trusteze.example/properties/oakwood-front.jpg",
            "https://images.trusteze.example/properties/oakwood-kitchen.jpg",
            "https://images.trusteze.example/properties/oakwood-yard.jpg",
        ],
        features: &["Finished basement", "Fenced yard", "Two-car garage", "Central air"],
    },
    SeedProperty {
        title: "Modern Downtown Condo with Skyline Views",
        description: "Bright corner unit on the 14th floor with \
                      floor-to-ceiling windows, in-unit laundry, and \
                      building gym and rooftop deck.",
        price: 325_000.0,
        address: "880 N Lake Shore Dr Unit 1404",
        city: "Chicago",
        state: "IL",
        zip_code: "60611",
        bedrooms: 2,
        bathrooms: 2.0,
        square_feet: 1150,
        lot_size: None,
        year_built: Some(2008),
        property_type: "condo",
        days_on_market: 25,
        realtor_index: 1,
        images: &[
            "https://images.trusteze.example/properties/lakeshore-living.jpg",
            "https://images.trusteze.example/properties/lakeshore-view.jpg",
        ],
        features: &["Skyline views", "In-unit laundry", "Rooftop deck", "Doorman"],
    },
    SeedProperty {
        title: "Charming Brick House Near the Lake",
        description: "Classic brick home a short walk from the lakefront, \
                      with original hardwood floors, a sunroom, and a \
                      detached garage.",
        price: 380_000.0,
        address: "2217 Maple Avenue",
        city: "Evanston",
        state: "IL",
        zip_code: "60201",
        bedrooms: 3,
        bathrooms: 2.0,
        square_feet: 1850,
        lot_size: Some(0.18),
        year_built: Some(1952),
        property_type: "house",
        days_on_market: 20,
        realtor_index: 2,
        images: &[
            "https://images.trusteze.example/properties/maple-front.jpg",
            "https://images.trusteze.example/properties/maple-sunroom.jpg",
        ],
        features: &["Hardwood floors", "Sunroom", "Walk to lake"],
    },
    SeedProperty {
        title: "Updated Townhouse in Quiet Community",
        description: "Move-in-ready townhouse with a renovated kitchen, \
                      attached garage, and community pool and trails.",
        price: 295_000.0,
        address: "512 Juniper Court",
        city: "Naperville",
        state: "IL",
        zip_code: "60540",
        bedrooms: 3,
        bathrooms: 2.5,
        square_feet: 1600,
        lot_size: Some(0.06),
        year_built: Some(2004),
        property_type: "townhouse",
        days_on_market: 15,
        realtor_index: 3,
        images: &[
            "https://images.trusteze.example/properties/juniper-front.jpg",
            "https://images.trusteze.example/properties/juniper-kitchen.jpg",
        ],
        features: &["Renovated kitchen", "Attached garage", "Community pool"],
    },
    SeedProperty {
        title: "Lakefront Retreat with Private Pier",
        description: "Year-round lake house with a wall of windows facing \
                      the water, wraparound deck, and a private pier with \
                      boat lift.",
        price: 650_000.0,
        address: "98 Shoreline Road",
        city: "Lake Geneva",
        state: "WI",
        zip_code: "53147",
        bedrooms: 4,
        bathrooms: 3.5,
        square_feet: 2800,
        lot_size: Some(0.52),
        year_built: Some(1989),
        property_type: "house",
        days_on_market: 10,
        realtor_index: 4,
        images: &[
            "https://images.trusteze.example/properties/shoreline-lake.jpg",
            "https://images.trusteze.example/properties/shoreline-deck.jpg",
            "https://images.trusteze.example/properties/shoreline-pier.jpg",
        ],
        features: &["Lake frontage", "Private pier", "Wraparound deck", "Stone fireplace"],
    },
    SeedProperty {
        title: "Cozy Third Ward Apartment",
        description: "Exposed-brick loft apartment in the Historic Third \
                      Ward, steps from the riverwalk and public market.",
        price: 275_000.0,
        address: "311 N Broadway Unit 3B",
        city: "Milwaukee",
        state: "WI",
        zip_code: "53202",
        bedrooms: 1,
        bathrooms: 1.0,
        square_feet: 900,
        lot_size: None,
        year_built: Some(1921),
        property_type: "apartment",
        days_on_market: 5,
        realtor_index: 5,
        images: &["https://images.trusteze.example/properties/broadway-loft.jpg"],
        features: &["Exposed brick", "Riverwalk access", "High ceilings"],
    },
];

pub async fn seed_demo_data(store: &Store, default_password: &str) -> Result<()> {
    seed_users(store, default_password).await?;

    if Properties::find().count(&store.conn).await? > 0 {
        return Ok(());
    }

    let realtor_ids = seed_realtors(store).await?;
    seed_properties(store, &realtor_ids).await?;

    info!("Demo listings seeded");
    Ok(())
}

async fn seed_users(store: &Store, default_password: &str) -> Result<()> {
    for (email, name, role) in DEMO_USERS {
        if store.get_user_by_email(email).await?.is_none() {
            store
                .create_user(email, default_password, name, None, None, &[role.to_string()])
                .await?;
            info!("Created demo account {email}");
        }
    }
    Ok(())
}

async fn seed_realtors(store: &Store) -> Result<Vec<String>> {
    let mut ids = Vec::with_capacity(DEMO_REALTORS.len());
    for realtor in &DEMO_REALTORS {
        let id = Uuid::new_v4().to_string();
        realtors::ActiveModel {
            id: Set(id.clone()),
            name: Set(realtor.name.to_string()),
            phone: Set(realtor.phone.to_string()),
            email: Set(realtor.email.to_string()),
            company: Set(realtor.company.to_string()),
            license_number: Set(realtor.license_number.to_string()),
        }
        .insert(&store.conn)
        .await?;
        ids.push(id);
    }
    Ok(ids)
}

async fn seed_properties(store: &Store, realtor_ids: &[String]) -> Result<()> {
    let now = Utc::now();

    for seed in &DEMO_PROPERTIES {
        let id = Uuid::new_v4().to_string();
        let listing_date = (now - Duration::days(seed.days_on_market)).to_rfc3339();

        properties::ActiveModel {
            id: Set(id.clone()),
            title: Set(seed.title.to_string()),
            description: Set(seed.description.to_string()),
            price: Set(seed.price),
            address: Set(seed.address.to_string()),
            city: Set(seed.city.to_string()),
            state: Set(seed.state.to_string()),
            zip_code: Set(seed.zip_code.to_string()),
            bedrooms: Set(seed.bedrooms),
            bathrooms: Set(seed.bathrooms),
            square_feet: Set(seed.square_feet),
            lot_size: Set(seed.lot_size),
            year_built: Set(seed.year_built),
            property_type: Set(seed.property_type.to_string()),
            is_for_sale: Set(true),
            is_for_rent: Set(false),
            listing_date: Set(listing_date),
            realtor_id: Set(realtor_ids[seed.realtor_index].clone()),
        }
        .insert(&store.conn)
        .await?;

        for (order, url) in seed.images.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            property_images::ActiveModel {
                property_id: Set(id.clone()),
                url: Set((*url).to_string()),
                alt_text: Set(Some(seed.title.to_string())),
                display_order: Set(order as i32),
                is_primary: Set(order == 0),
                ..Default::default()
            }
            .insert(&store.conn)
            .await?;
        }

        for feature in seed.features {
            property_features::ActiveModel {
                property_id: Set(id.clone()),
                name: Set((*feature).to_string()),
                ..Default::default()
            }
            .insert(&store.conn)
            .await?;
        }
    }

    Ok(())
}
