//! Address book handlers.

use tabled::Tabled;

use partshop_api::models::AddressInput;
use partshop_core::{Address, Storefront};

use crate::cli::{AddressesArgs, AddressesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AddressRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Default")]
    default: String,
}

impl From<&Address> for AddressRow {
    fn from(a: &Address) -> Self {
        Self {
            id: a.id,
            label: a.label.clone().unwrap_or_default(),
            name: format!("{} {}", a.first_name, a.last_name).trim().to_owned(),
            address: a.one_line(),
            default: if a.is_default { "*".into() } else { String::new() },
        }
    }
}

pub async fn handle(
    shop: &Storefront,
    args: AddressesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AddressesCommand::List => {
            let addresses = shop.addresses().await?;
            let out = output::render_list(
                &global.output,
                &addresses,
                |r| AddressRow::from(r),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AddressesCommand::Create { from_file } => {
            let input: AddressInput = util::read_json_file(&from_file)?;
            let created = shop.create_address(&input).await?;
            let out = output::render_single(
                &global.output,
                &created,
                |a| format!("Address {} saved: {}", a.id, a.one_line()),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AddressesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete address {id}?"), global.yes)? {
                return Ok(());
            }
            shop.delete_address(id)
                .await
                .map_err(|e| CliError::not_found_or(e, "address", id, "addresses list"))?;
            if !global.quiet {
                eprintln!("Address deleted");
            }
            Ok(())
        }

        AddressesCommand::Default { id } => {
            shop.set_default_address(id)
                .await
                .map_err(|e| CliError::not_found_or(e, "address", id, "addresses list"))?;
            if !global.quiet {
                eprintln!("Default address set");
            }
            Ok(())
        }
    }
}
