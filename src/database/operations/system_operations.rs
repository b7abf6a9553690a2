use anyhow::Result;
use sqlx::PgPool;

pub struct SystemOperations;

impl SystemOperations {
    pub async fn create_tables(pool: &PgPool) -> Result<()> {
        // Create cryptocurrencies table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cryptocurrencies (
                id SERIAL PRIMARY KEY,
                cmc_id BIGINT,
                rank INTEGER NOT NULL,
                name VARCHAR(100) NOT NULL,
                symbol VARCHAR(20) NOT NULL,
                slug VARCHAR(100) NOT NULL UNIQUE,
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                status INTEGER NOT NULL DEFAULT 1,
                first_historical_data TIMESTAMPTZ,
                last_historical_data TIMESTAMPTZ,
                platform VARCHAR(100),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Create cryptocurrency_metadata table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cryptocurrency_metadata (
                id SERIAL PRIMARY KEY,
                cryptocurrency_id INTEGER NOT NULL UNIQUE REFERENCES cryptocurrencies(id),
                logo TEXT,
                description TEXT,
                date_added TIMESTAMPTZ,
                date_launched TIMESTAMPTZ,
                tags TEXT[] NOT NULL DEFAULT '{}',
                category VARCHAR(100),
                platform JSONB,
                website_urls TEXT[] NOT NULL DEFAULT '{}',
                technical_doc_urls TEXT[] NOT NULL DEFAULT '{}',
                twitter_urls TEXT[] NOT NULL DEFAULT '{}',
                reddit_urls TEXT[] NOT NULL DEFAULT '{}',
                message_board_urls TEXT[] NOT NULL DEFAULT '{}',
                announcement_urls TEXT[] NOT NULL DEFAULT '{}',
                chat_urls TEXT[] NOT NULL DEFAULT '{}',
                explorer_urls TEXT[] NOT NULL DEFAULT '{}',
                source_code_urls TEXT[] NOT NULL DEFAULT '{}',
                facebook_urls TEXT[] NOT NULL DEFAULT '{}',
                subreddit VARCHAR(100),
                twitter_username VARCHAR(100),
                is_hidden BOOLEAN NOT NULL DEFAULT FALSE,
                notice TEXT,
                tag_names TEXT[] NOT NULL DEFAULT '{}',
                tag_groups TEXT[] NOT NULL DEFAULT '{}',
                contract_addresses JSONB,
                self_reported_circulating_supply DECIMAL(24, 8),
                self_reported_market_cap DECIMAL(24, 8),
                self_reported_tags TEXT[],
                infinite_supply BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Create cryptocurrency_prices table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cryptocurrency_prices (
                id SERIAL PRIMARY KEY,
                cryptocurrency_id INTEGER NOT NULL REFERENCES cryptocurrencies(id),
                cmc_id BIGINT NOT NULL,
                price DECIMAL(20, 8) NOT NULL,
                market_cap DECIMAL(24, 2) NOT NULL,
                volume_24h DECIMAL(24, 2) NOT NULL,
                percent_change_1h DECIMAL(10, 4),
                percent_change_24h DECIMAL(10, 4),
                percent_change_7d DECIMAL(10, 4),
                percent_change_30d DECIMAL(10, 4),
                percent_change_60d DECIMAL(10, 4),
                percent_change_90d DECIMAL(10, 4),
                market_cap_dominance DECIMAL(10, 4),
                fully_diluted_market_cap DECIMAL(24, 2),
                circulating_supply DECIMAL(24, 8),
                total_supply DECIMAL(24, 8),
                max_supply DECIMAL(24, 8),
                cmc_rank INTEGER,
                volume_change_24h DECIMAL(10, 4),
                num_market_pairs INTEGER,
                is_active BOOLEAN,
                is_fiat BOOLEAN,
                tvl_ratio DECIMAL(12, 8),
                tags TEXT[],
                recorded_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
        // Indexes for cryptocurrencies
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_cryptocurrencies_rank ON cryptocurrencies(rank)")
            .execute(pool).await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_cryptocurrencies_symbol ON cryptocurrencies(symbol)")
            .execute(pool).await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_cryptocurrencies_active ON cryptocurrencies(is_active)")
            .execute(pool).await?;

        // Indexes for cryptocurrency_prices
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_prices_crypto_recorded ON cryptocurrency_prices(cryptocurrency_id, recorded_at)")
            .execute(pool).await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_prices_cmc_recorded ON cryptocurrency_prices(cmc_id, recorded_at)")
            .execute(pool).await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_prices_recorded ON cryptocurrency_prices(recorded_at)")
            .execute(pool).await?;

        Ok(())
    }

    pub async fn health_check(pool: &PgPool) -> Result<bool, sqlx::Error> {
        sqlx::query("SELECT 1 as health_check")
            .fetch_one(pool)
            .await?;
        Ok(true)
    }
}
