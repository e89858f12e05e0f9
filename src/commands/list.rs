//! List loaded catalog content

use crate::content::DataLoader;
use crate::error::Result;
use crate::templates::format_money;
use crate::Site;

/// List catalog content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let data = DataLoader::new(&site.data_dir).load_all()?;

    match content_type {
        "loan" | "loans" => {
            println!("Loan types ({}):", data.loan_types.len());
            for loan in &data.loan_types {
                println!("  {} [{}]", loan.name, loan.slug);
            }
        }
        "property" | "properties" => {
            println!("Property types ({}):", data.property_types.len());
            for prop in &data.property_types {
                println!("  {} [{}]", prop.name, prop.slug);
            }
        }
        "city" | "cities" => {
            println!("Cities ({}):", data.cities.len());
            for city in &data.cities {
                println!("  {}, {} - {} [{}]", city.city, city.state, city.metro, city.slug);
            }
        }
        "transaction" | "transactions" => {
            println!("Transactions ({}):", data.transactions.len());
            for txn in &data.transactions {
                println!(
                    "  {} - {} ({} / {})",
                    format_money(txn.amount()),
                    txn.city,
                    txn.loan_type_slug,
                    txn.property_slug
                );
            }
        }
        _ => {
            println!("Unknown type: {}", content_type);
            println!("Available types: loan, property, city, transaction");
        }
    }

    Ok(())
}
