//! Declarative test builder.
//!
//! The builder queues table creation and fixture inserts, all of which run during the final
//! `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_all_tables: bool,

    // (username, role, status)
    users: Vec<(String, String, String)>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_all_tables: false,
            users: Vec::new(),
        }
    }

    /// Add every AutoRBI table to the test database, in foreign key order.
    pub fn with_all_tables(mut self) -> Self {
        self.include_all_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use autorbi_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), autorbi_test_utils::TestError> {
    /// let test = TestBuilder::new().with_table(User).build().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a fixture user during `build()`.
    ///
    /// The user's password column holds a placeholder that never verifies, tests covering
    /// login should create the user through the user service instead.
    pub fn with_user(
        mut self,
        username: impl Into<String>,
        role: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        self.users
            .push((username.into(), role.into(), status.into()));
        self
    }

    /// Build the test context by creating all configured tables and fixtures.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_all_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::User),
                schema.create_table_from_entity(entity::prelude::Work),
                schema.create_table_from_entity(entity::prelude::AssignWork),
                schema.create_table_from_entity(entity::prelude::Equipment),
                schema.create_table_from_entity(entity::prelude::Component),
                schema.create_table_from_entity(entity::prelude::WorkHistory),
                schema.create_table_from_entity(entity::prelude::CorrectionLog),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for (username, role, status) in self.users {
            setup.user().insert_user(&username, &role, &status).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
