use bazaar_app::database;
use clap::Args;
use sqlx::{PgConnection, query, query_scalar};

#[derive(Debug, Args)]
pub(crate) struct EnsureAppRoleArgs {
    /// Administrative PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Role the storefront API connects as
    #[arg(long, default_value = "bazaar_app")]
    role_name: String,

    /// Password to set on the role
    #[arg(long, env = "APP_DB_PASSWORD", hide_env_values = true)]
    password: String,
}

/// Flags every API role must carry. Carts, wishlists and browsing history are
/// only isolated while row-level security applies to the connection.
const ROLE_FLAGS: &str = "LOGIN NOSUPERUSER NOCREATEDB NOCREATEROLE NOREPLICATION NOBYPASSRLS";

async fn quoted(
    conn: &mut PgConnection,
    function: &str,
    value: &str,
) -> Result<String, String> {
    query_scalar(&format!("SELECT {function}($1)"))
        .bind(value)
        .fetch_one(conn)
        .await
        .map_err(|error| format!("failed to quote value with {function}: {error}"))
}

fn grants(role: &str, database: &str) -> [String; 5] {
    [
        format!("GRANT CONNECT ON DATABASE {database} TO {role}"),
        format!("GRANT USAGE ON SCHEMA public TO {role}"),
        format!("GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {role}"),
        format!(
            "ALTER DEFAULT PRIVILEGES IN SCHEMA public GRANT SELECT, INSERT, UPDATE, DELETE ON TABLES TO {role}"
        ),
        format!(
            "ALTER DEFAULT PRIVILEGES IN SCHEMA public GRANT USAGE, SELECT ON SEQUENCES TO {role}"
        ),
    ]
}

pub(crate) async fn run(args: EnsureAppRoleArgs) -> Result<(), String> {
    if args.role_name.trim().is_empty() {
        return Err("role name cannot be empty".to_string());
    }

    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|error| format!("failed to start transaction: {error}"))?;

    let role = quoted(&mut tx, "quote_ident", &args.role_name).await?;
    let password = quoted(&mut tx, "quote_literal", &args.password).await?;

    let exists: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1)")
        .bind(&args.role_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to look up role: {error}"))?;

    let verb = if exists { "ALTER" } else { "CREATE" };

    query(&format!("{verb} ROLE {role} {ROLE_FLAGS} PASSWORD {password}"))
        .execute(&mut *tx)
        .await
        .map_err(|error| format!("failed to {} role: {error}", verb.to_lowercase()))?;

    let database: String = query_scalar("SELECT quote_ident(current_database())")
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to resolve database name: {error}"))?;

    for sql in grants(&role, &database) {
        query(&sql)
            .execute(&mut *tx)
            .await
            .map_err(|error| format!("failed to run `{sql}`: {error}"))?;
    }

    tx.commit()
        .await
        .map_err(|error| format!("failed to commit role changes: {error}"))?;

    println!(
        "{} role {} with table access in {database}",
        if exists { "updated" } else { "created" },
        args.role_name
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_cover_existing_and_future_tables() {
        let statements = grants("\"bazaar_app\"", "\"bazaar\"");

        assert!(statements[0].starts_with("GRANT CONNECT ON DATABASE \"bazaar\""));
        assert!(statements.iter().any(|sql| sql.contains("ON ALL TABLES")));
        assert!(statements.iter().any(|sql| sql.starts_with("ALTER DEFAULT PRIVILEGES")));
        assert!(ROLE_FLAGS.contains("NOBYPASSRLS"));
    }
}
