//! Tenant commands
//!
//! Usage:
//!   identx tenant create <ID> [--name <NAME>]
//!   identx tenant delete <ID>
//!   identx tenant query [filters] [--order-by <FIELD[:DIR]>]... [--count | --single]

use clap::{Args, Subcommand};
use identx_core::core_types::RequestContext;
use identx_core::queries::{SortDir, TenantField};
use identx_core::{IdentityService, TenantStore};
use identx_store::SqliteTenantStore;
use std::path::Path;

#[derive(Debug, Args)]
pub struct TenantArgs {
    #[command(subcommand)]
    pub command: TenantCommand,
}

#[derive(Debug, Subcommand)]
pub enum TenantCommand {
    /// Create a tenant, or rename an existing one
    Create(CreateArgs),
    /// Delete a tenant
    Delete(DeleteArgs),
    /// Query tenants
    Query(QueryArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Tenant id
    pub id: String,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Tenant id
    pub id: String,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Exact tenant id
    #[arg(long)]
    pub id: Option<String>,

    /// Comma-separated tenant ids; with no value, matches nothing
    #[arg(long = "id-in", value_delimiter = ',', num_args = 0..)]
    pub id_in: Option<Vec<String>>,

    /// Exact tenant name
    #[arg(long)]
    pub name: Option<String>,

    /// Name pattern, `%` matches any run of characters
    #[arg(long = "name-like")]
    pub name_like: Option<String>,

    /// Sort key `id` or `name`, optionally suffixed with `:asc` or `:desc`
    #[arg(long = "order-by")]
    pub order_by: Vec<String>,

    /// Index of the first result to return
    #[arg(long)]
    pub first: Option<usize>,

    /// Maximum number of results to return
    #[arg(long)]
    pub max: Option<usize>,

    /// Print the number of matches instead of the tenants
    #[arg(long, conflicts_with = "single")]
    pub count: bool,

    /// Print the single match, or null; fails if more than one matches
    #[arg(long)]
    pub single: bool,
}

/// Execute tenant command
pub fn execute(
    args: TenantArgs,
    db: &Path,
    context: RequestContext,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = IdentityService::with_context(SqliteTenantStore::open(db)?, context);

    match args.command {
        TenantCommand::Create(create_args) => execute_create(&service, create_args),
        TenantCommand::Delete(delete_args) => execute_delete(&service, delete_args),
        TenantCommand::Query(query_args) => execute_query(&service, query_args),
    }
}

fn execute_create(
    service: &IdentityService<SqliteTenantStore>,
    args: CreateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut tenant = service.new_tenant(args.id)?;
    if let Some(name) = args.name {
        tenant.set_name(name);
    }
    service.save_tenant(&tenant)?;

    println!("{}", serde_json::to_string_pretty(&tenant)?);
    Ok(())
}

fn execute_delete(
    service: &IdentityService<SqliteTenantStore>,
    args: DeleteArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let existed = service.store().get(&args.id)?.is_some();
    service.delete_tenant(&args.id)?;

    if existed {
        println!("Deleted tenant {}", args.id);
    } else {
        println!("Tenant {} not found", args.id);
    }
    Ok(())
}

fn execute_query(
    service: &IdentityService<SqliteTenantStore>,
    args: QueryArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut query = service.create_tenant_query();

    if let Some(id) = args.id {
        query.tenant_id(id)?;
    }
    if let Some(ids) = args.id_in {
        query.tenant_id_in(ids);
    }
    if let Some(name) = args.name {
        query.tenant_name(name)?;
    }
    if let Some(pattern) = args.name_like {
        query.tenant_name_like(&pattern)?;
    }

    for key in &args.order_by {
        let (field, direction) = parse_order_key(key)?;
        match field {
            TenantField::Id => query.order_by_tenant_id(),
            TenantField::Name => query.order_by_tenant_name(),
        };
        match direction {
            Some(SortDir::Asc) => {
                query.asc()?;
            }
            Some(SortDir::Desc) => {
                query.desc()?;
            }
            None => {}
        }
    }

    if let Some(first) = args.first {
        query.first_result(first);
    }
    if let Some(max) = args.max {
        query.max_results(max);
    }

    if args.count {
        println!("{}", query.count()?);
    } else if args.single {
        println!("{}", serde_json::to_string_pretty(&query.single_result()?)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&query.list()?)?);
    }

    Ok(())
}

/// Parse `field` or `field:dir`
fn parse_order_key(
    key: &str,
) -> Result<(TenantField, Option<SortDir>), Box<dyn std::error::Error>> {
    match key.split_once(':') {
        Some((field, direction)) => Ok((field.parse()?, Some(direction.parse()?))),
        None => Ok((key.parse()?, None)),
    }
}
