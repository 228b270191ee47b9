use async_graphql::{
    Context, ID, InputObject, Object, Result as GqlResult, Schema, Subscription,
};
use chrono::{NaiveDate, NaiveTime};
use event_planner::bus::event_bus::EventBus;
use event_planner::bus::topics;
use event_planner::config::SubscriptionFamily;
use event_planner::core::entities::{
    Account, AccountPatch, Entity, Location, LocationPatch, NewAccount, NewLocation,
    NewParticipation, NewScheduledEvent, Participation, ParticipationPatch, ScheduledEvent,
    ScheduledEventPatch,
};
use event_planner::dispatch::MutationDispatcher;
use event_planner::live::changes::changes;
use event_planner::live::counter::counter;
use event_planner::relations;
use event_planner::store::Store;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;

type Dispatcher<T> = MutationDispatcher<T, EventBus>;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub bus: Arc<EventBus>,
    pub subscriptions: SubscriptionFamily,
    pub accounts: Arc<Dispatcher<Account>>,
    pub events: Arc<Dispatcher<ScheduledEvent>>,
    pub locations: Arc<Dispatcher<Location>>,
    pub participations: Arc<Dispatcher<Participation>>,
}

impl AppState {
    pub fn new(store: Store, bus: Arc<EventBus>, subscriptions: SubscriptionFamily) -> Self {
        let observable = subscriptions == SubscriptionFamily::EntityChanges;
        Self {
            accounts: Arc::new(MutationDispatcher::new(
                store.accounts.clone(),
                bus.clone(),
                observable.then_some(topics::ACCOUNTS),
            )),
            events: Arc::new(MutationDispatcher::new(
                store.events.clone(),
                bus.clone(),
                observable.then_some(topics::EVENTS),
            )),
            // Locations are not mutation observable in any configuration.
            locations: Arc::new(MutationDispatcher::new(
                store.locations.clone(),
                bus.clone(),
                None,
            )),
            participations: Arc::new(MutationDispatcher::new(
                store.participations.clone(),
                bus.clone(),
                observable.then_some(topics::PARTICIPATIONS),
            )),
            store,
            bus,
            subscriptions,
        }
    }
}

pub struct GqlAccount(pub Account);

#[Object(name = "Account")]
impl GqlAccount {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn username(&self) -> &str {
        &self.0.username
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    /// Events this account owns, resolved against live store state.
    async fn events(&self, context: &Context<'_>) -> Vec<GqlEvent> {
        let state = context.data_unchecked::<AppState>();
        relations::account_events(&state.store, &self.0)
            .await
            .into_iter()
            .map(GqlEvent)
            .collect()
    }

    async fn participations(&self, context: &Context<'_>) -> Vec<GqlParticipation> {
        let state = context.data_unchecked::<AppState>();
        relations::account_participations(&state.store, &self.0)
            .await
            .into_iter()
            .map(GqlParticipation)
            .collect()
    }
}

pub struct GqlEvent(pub ScheduledEvent);

#[Object(name = "Event")]
impl GqlEvent {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn date(&self) -> NaiveDate {
        self.0.date
    }

    async fn start_time(&self) -> NaiveTime {
        self.0.start_time
    }

    async fn end_time(&self) -> NaiveTime {
        self.0.end_time
    }

    async fn owner_id(&self) -> ID {
        ID(self.0.owner_id.clone())
    }

    async fn location_id(&self) -> ID {
        ID(self.0.location_id.clone())
    }

    async fn owner(&self, context: &Context<'_>) -> Option<GqlAccount> {
        let state = context.data_unchecked::<AppState>();
        relations::event_owner(&state.store, &self.0)
            .await
            .map(GqlAccount)
    }

    async fn location(&self, context: &Context<'_>) -> Option<GqlLocation> {
        let state = context.data_unchecked::<AppState>();
        relations::event_location(&state.store, &self.0)
            .await
            .map(GqlLocation)
    }

    async fn participations(&self, context: &Context<'_>) -> Vec<GqlParticipation> {
        let state = context.data_unchecked::<AppState>();
        relations::event_participations(&state.store, &self.0)
            .await
            .into_iter()
            .map(GqlParticipation)
            .collect()
    }
}

pub struct GqlLocation(pub Location);

#[Object(name = "Location")]
impl GqlLocation {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn latitude(&self) -> f64 {
        self.0.latitude
    }

    async fn longitude(&self) -> f64 {
        self.0.longitude
    }

    async fn events(&self, context: &Context<'_>) -> Vec<GqlEvent> {
        let state = context.data_unchecked::<AppState>();
        relations::location_events(&state.store, &self.0)
            .await
            .into_iter()
            .map(GqlEvent)
            .collect()
    }
}

pub struct GqlParticipation(pub Participation);

#[Object(name = "Participation")]
impl GqlParticipation {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn account_id(&self) -> ID {
        ID(self.0.account_id.clone())
    }

    async fn event_id(&self) -> ID {
        ID(self.0.event_id.clone())
    }

    async fn account(&self, context: &Context<'_>) -> Option<GqlAccount> {
        let state = context.data_unchecked::<AppState>();
        relations::participation_account(&state.store, &self.0)
            .await
            .map(GqlAccount)
    }

    async fn event(&self, context: &Context<'_>) -> Option<GqlEvent> {
        let state = context.data_unchecked::<AppState>();
        relations::participation_event(&state.store, &self.0)
            .await
            .map(GqlEvent)
    }
}

#[derive(InputObject)]
pub struct AddAccountInput {
    pub username: String,
    pub email: String,
}

impl From<AddAccountInput> for NewAccount {
    fn from(input: AddAccountInput) -> Self {
        Self {
            username: input.username,
            email: input.email,
        }
    }
}

#[derive(InputObject)]
pub struct UpdateAccountInput {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl From<UpdateAccountInput> for AccountPatch {
    fn from(input: UpdateAccountInput) -> Self {
        Self {
            username: input.username,
            email: input.email,
        }
    }
}

#[derive(InputObject)]
pub struct AddEventInput {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub owner_id: ID,
    pub location_id: ID,
}

impl From<AddEventInput> for NewScheduledEvent {
    fn from(input: AddEventInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            owner_id: input.owner_id.0,
            location_id: input.location_id.0,
        }
    }
}

#[derive(InputObject)]
pub struct UpdateEventInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub owner_id: Option<ID>,
    pub location_id: Option<ID>,
}

impl From<UpdateEventInput> for ScheduledEventPatch {
    fn from(input: UpdateEventInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            owner_id: input.owner_id.map(|id| id.0),
            location_id: input.location_id.map(|id| id.0),
        }
    }
}

#[derive(InputObject)]
pub struct AddLocationInput {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<AddLocationInput> for NewLocation {
    fn from(input: AddLocationInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            latitude: input.latitude,
            longitude: input.longitude,
        }
    }
}

#[derive(InputObject)]
pub struct UpdateLocationInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<UpdateLocationInput> for LocationPatch {
    fn from(input: UpdateLocationInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            latitude: input.latitude,
            longitude: input.longitude,
        }
    }
}

#[derive(InputObject)]
pub struct AddParticipationInput {
    pub account_id: ID,
    pub event_id: ID,
}

impl From<AddParticipationInput> for NewParticipation {
    fn from(input: AddParticipationInput) -> Self {
        Self {
            account_id: input.account_id.0,
            event_id: input.event_id.0,
        }
    }
}

#[derive(InputObject)]
pub struct UpdateParticipationInput {
    pub account_id: Option<ID>,
    pub event_id: Option<ID>,
}

impl From<UpdateParticipationInput> for ParticipationPatch {
    fn from(input: UpdateParticipationInput) -> Self {
        Self {
            account_id: input.account_id.map(|id| id.0),
            event_id: input.event_id.map(|id| id.0),
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn accounts(&self, context: &Context<'_>) -> Vec<GqlAccount> {
        let state = context.data_unchecked::<AppState>();
        state
            .store
            .accounts
            .list()
            .await
            .into_iter()
            .map(GqlAccount)
            .collect()
    }

    async fn account(&self, context: &Context<'_>, id: ID) -> Option<GqlAccount> {
        let state = context.data_unchecked::<AppState>();
        state.store.accounts.get(&id.0).await.map(GqlAccount)
    }

    async fn events(&self, context: &Context<'_>) -> Vec<GqlEvent> {
        let state = context.data_unchecked::<AppState>();
        state
            .store
            .events
            .list()
            .await
            .into_iter()
            .map(GqlEvent)
            .collect()
    }

    async fn event(&self, context: &Context<'_>, id: ID) -> Option<GqlEvent> {
        let state = context.data_unchecked::<AppState>();
        state.store.events.get(&id.0).await.map(GqlEvent)
    }

    async fn locations(&self, context: &Context<'_>) -> Vec<GqlLocation> {
        let state = context.data_unchecked::<AppState>();
        state
            .store
            .locations
            .list()
            .await
            .into_iter()
            .map(GqlLocation)
            .collect()
    }

    async fn location(&self, context: &Context<'_>, id: ID) -> Option<GqlLocation> {
        let state = context.data_unchecked::<AppState>();
        state.store.locations.get(&id.0).await.map(GqlLocation)
    }

    async fn participations(&self, context: &Context<'_>) -> Vec<GqlParticipation> {
        let state = context.data_unchecked::<AppState>();
        state
            .store
            .participations
            .list()
            .await
            .into_iter()
            .map(GqlParticipation)
            .collect()
    }

    async fn participation(&self, context: &Context<'_>, id: ID) -> Option<GqlParticipation> {
        let state = context.data_unchecked::<AppState>();
        state
            .store
            .participations
            .get(&id.0)
            .await
            .map(GqlParticipation)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_account(&self, context: &Context<'_>, input: AddAccountInput) -> GqlAccount {
        let state = context.data_unchecked::<AppState>();
        GqlAccount(state.accounts.create(input.into()).await)
    }

    async fn update_account(
        &self,
        context: &Context<'_>,
        id: ID,
        input: UpdateAccountInput,
    ) -> GqlResult<GqlAccount> {
        let state = context.data_unchecked::<AppState>();
        state
            .accounts
            .update(&id.0, input.into())
            .await
            .map(GqlAccount)
            .map_err(|e| async_graphql::Error::new(e.to_string()))
    }

    async fn delete_account(&self, context: &Context<'_>, id: ID) -> GqlResult<GqlAccount> {
        let state = context.data_unchecked::<AppState>();
        state
            .accounts
            .delete(&id.0)
            .await
            .map(GqlAccount)
            .map_err(|e| async_graphql::Error::new(e.to_string()))
    }

    async fn delete_all_accounts(&self, context: &Context<'_>) -> Vec<GqlAccount> {
        let state = context.data_unchecked::<AppState>();
        state
            .accounts
            .delete_all()
            .await
            .into_iter()
            .map(GqlAccount)
            .collect()
    }

    async fn add_event(&self, context: &Context<'_>, input: AddEventInput) -> GqlEvent {
        let state = context.data_unchecked::<AppState>();
        GqlEvent(state.events.create(input.into()).await)
    }

    async fn update_event(
        &self,
        context: &Context<'_>,
        id: ID,
        input: UpdateEventInput,
    ) -> GqlResult<GqlEvent> {
        let state = context.data_unchecked::<AppState>();
        state
            .events
            .update(&id.0, input.into())
            .await
            .map(GqlEvent)
            .map_err(|e| async_graphql::Error::new(e.to_string()))
    }

    async fn delete_event(&self, context: &Context<'_>, id: ID) -> GqlResult<GqlEvent> {
        let state = context.data_unchecked::<AppState>();
        state
            .events
            .delete(&id.0)
            .await
            .map(GqlEvent)
            .map_err(|e| async_graphql::Error::new(e.to_string()))
    }

    async fn delete_all_events(&self, context: &Context<'_>) -> Vec<GqlEvent> {
        let state = context.data_unchecked::<AppState>();
        state
            .events
            .delete_all()
            .await
            .into_iter()
            .map(GqlEvent)
            .collect()
    }

    async fn add_location(&self, context: &Context<'_>, input: AddLocationInput) -> GqlLocation {
        let state = context.data_unchecked::<AppState>();
        GqlLocation(state.locations.create(input.into()).await)
    }

    async fn update_location(
        &self,
        context: &Context<'_>,
        id: ID,
        input: UpdateLocationInput,
    ) -> GqlResult<GqlLocation> {
        let state = context.data_unchecked::<AppState>();
        state
            .locations
            .update(&id.0, input.into())
            .await
            .map(GqlLocation)
            .map_err(|e| async_graphql::Error::new(e.to_string()))
    }

    async fn delete_location(&self, context: &Context<'_>, id: ID) -> GqlResult<GqlLocation> {
        let state = context.data_unchecked::<AppState>();
        state
            .locations
            .delete(&id.0)
            .await
            .map(GqlLocation)
            .map_err(|e| async_graphql::Error::new(e.to_string()))
    }

    async fn delete_all_locations(&self, context: &Context<'_>) -> Vec<GqlLocation> {
        let state = context.data_unchecked::<AppState>();
        state
            .locations
            .delete_all()
            .await
            .into_iter()
            .map(GqlLocation)
            .collect()
    }

    async fn add_participation(
        &self,
        context: &Context<'_>,
        input: AddParticipationInput,
    ) -> GqlParticipation {
        let state = context.data_unchecked::<AppState>();
        GqlParticipation(state.participations.create(input.into()).await)
    }

    async fn update_participation(
        &self,
        context: &Context<'_>,
        id: ID,
        input: UpdateParticipationInput,
    ) -> GqlResult<GqlParticipation> {
        let state = context.data_unchecked::<AppState>();
        state
            .participations
            .update(&id.0, input.into())
            .await
            .map(GqlParticipation)
            .map_err(|e| async_graphql::Error::new(e.to_string()))
    }

    async fn delete_participation(
        &self,
        context: &Context<'_>,
        id: ID,
    ) -> GqlResult<GqlParticipation> {
        let state = context.data_unchecked::<AppState>();
        state
            .participations
            .delete(&id.0)
            .await
            .map(GqlParticipation)
            .map_err(|e| async_graphql::Error::new(e.to_string()))
    }

    async fn delete_all_participations(&self, context: &Context<'_>) -> Vec<GqlParticipation> {
        let state = context.data_unchecked::<AppState>();
        state
            .participations
            .delete_all()
            .await
            .into_iter()
            .map(GqlParticipation)
            .collect()
    }
}

/// Attach to one entity change topic, or refuse when the counter family is
/// the active one.
fn entity_changes<T>(
    context: &Context<'_>,
    topic: &'static str,
) -> Result<impl Stream<Item = T>, async_graphql::Error>
where
    T: Entity,
{
    let state = context.data_unchecked::<AppState>();
    if state.subscriptions != SubscriptionFamily::EntityChanges {
        return Err(async_graphql::Error::new(
            "entity change subscriptions are not enabled",
        ));
    }
    Ok(changes::<T>(&state.bus, topic))
}

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    async fn account_created(
        &self,
        context: &Context<'_>,
    ) -> Result<impl Stream<Item = GqlAccount>, async_graphql::Error> {
        Ok(entity_changes::<Account>(context, topics::ACCOUNTS.created)?.map(GqlAccount))
    }

    async fn account_updated(
        &self,
        context: &Context<'_>,
    ) -> Result<impl Stream<Item = GqlAccount>, async_graphql::Error> {
        Ok(entity_changes::<Account>(context, topics::ACCOUNTS.updated)?.map(GqlAccount))
    }

    async fn account_deleted(
        &self,
        context: &Context<'_>,
    ) -> Result<impl Stream<Item = GqlAccount>, async_graphql::Error> {
        Ok(entity_changes::<Account>(context, topics::ACCOUNTS.deleted)?.map(GqlAccount))
    }

    async fn event_created(
        &self,
        context: &Context<'_>,
    ) -> Result<impl Stream<Item = GqlEvent>, async_graphql::Error> {
        Ok(entity_changes::<ScheduledEvent>(context, topics::EVENTS.created)?.map(GqlEvent))
    }

    async fn event_updated(
        &self,
        context: &Context<'_>,
    ) -> Result<impl Stream<Item = GqlEvent>, async_graphql::Error> {
        Ok(entity_changes::<ScheduledEvent>(context, topics::EVENTS.updated)?.map(GqlEvent))
    }

    async fn event_deleted(
        &self,
        context: &Context<'_>,
    ) -> Result<impl Stream<Item = GqlEvent>, async_graphql::Error> {
        Ok(entity_changes::<ScheduledEvent>(context, topics::EVENTS.deleted)?.map(GqlEvent))
    }

    async fn participation_created(
        &self,
        context: &Context<'_>,
    ) -> Result<impl Stream<Item = GqlParticipation>, async_graphql::Error> {
        Ok(
            entity_changes::<Participation>(context, topics::PARTICIPATIONS.created)?
                .map(GqlParticipation),
        )
    }

    async fn participation_updated(
        &self,
        context: &Context<'_>,
    ) -> Result<impl Stream<Item = GqlParticipation>, async_graphql::Error> {
        Ok(
            entity_changes::<Participation>(context, topics::PARTICIPATIONS.updated)?
                .map(GqlParticipation),
        )
    }

    async fn participation_deleted(
        &self,
        context: &Context<'_>,
    ) -> Result<impl Stream<Item = GqlParticipation>, async_graphql::Error> {
        Ok(
            entity_changes::<Participation>(context, topics::PARTICIPATIONS.deleted)?
                .map(GqlParticipation),
        )
    }

    /// One independent timer per subscriber; cancelling the subscription
    /// stops only that timer.
    async fn counter(&self, context: &Context<'_>) -> Result<impl Stream<Item = u64>, async_graphql::Error> {
        let state = context.data_unchecked::<AppState>();
        if state.subscriptions != SubscriptionFamily::Counter {
            return Err(async_graphql::Error::new(
                "counter subscriptions are not enabled",
            ));
        }
        Ok(counter(Duration::from_secs(1)))
    }
}

pub type AppSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

#[cfg(test)]
mod schema_tests {
    use super::*;
    use futures::FutureExt;

    fn test_schema(subscriptions: SubscriptionFamily) -> (AppSchema, AppState) {
        let state = AppState::new(Store::new(), Arc::new(EventBus::new()), subscriptions);
        let schema = Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
            .data(state.clone())
            .finish();
        (schema, state)
    }

    #[tokio::test]
    async fn it_should_add_and_list_accounts() {
        let (schema, _) = test_schema(SubscriptionFamily::EntityChanges);

        let response = schema
            .execute(
                r#"mutation { addAccount(input: {username: "ada", email: "ada@example.com"}) { id username email } }"#,
            )
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(data["addAccount"]["username"], "ada");
        assert_eq!(data["addAccount"]["email"], "ada@example.com");

        let response = schema.execute("{ accounts { username } }").await;
        let data = response.data.into_json().unwrap();
        assert_eq!(data["accounts"][0]["username"], "ada");
    }

    #[tokio::test]
    async fn it_should_merge_an_update_and_keep_omitted_fields() {
        let (schema, _) = test_schema(SubscriptionFamily::EntityChanges);

        let response = schema
            .execute(
                r#"mutation { addAccount(input: {username: "ada", email: "ada@example.com"}) { id } }"#,
            )
            .await;
        let data = response.data.into_json().unwrap();
        let id = data["addAccount"]["id"].as_str().unwrap().to_string();

        let response = schema
            .execute(format!(
                r#"mutation {{ updateAccount(id: "{id}", input: {{email: "b@example.com"}}) {{ username email }} }}"#
            ))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(data["updateAccount"]["username"], "ada");
        assert_eq!(data["updateAccount"]["email"], "b@example.com");
    }

    #[tokio::test]
    async fn it_should_report_not_found_with_a_null_result() {
        let (schema, _) = test_schema(SubscriptionFamily::EntityChanges);

        let response = schema
            .execute(r#"mutation { updateAccount(id: "missing", input: {}) { id } }"#)
            .await;
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("not found"));
        assert!(response.data.into_json().unwrap().is_null());
    }

    #[tokio::test]
    async fn it_should_resolve_relations_against_live_state() {
        let (schema, _) = test_schema(SubscriptionFamily::EntityChanges);

        let data = schema
            .execute(
                r#"mutation { addLocation(input: {name: "Office", description: "hq", latitude: 52.37, longitude: 4.89}) { id } }"#,
            )
            .await
            .data
            .into_json()
            .unwrap();
        let location_id = data["addLocation"]["id"].as_str().unwrap().to_string();

        let data = schema
            .execute(
                r#"mutation { addAccount(input: {username: "ada", email: "ada@example.com"}) { id } }"#,
            )
            .await
            .data
            .into_json()
            .unwrap();
        let owner_id = data["addAccount"]["id"].as_str().unwrap().to_string();

        let response = schema
            .execute(format!(
                r#"mutation {{ addEvent(input: {{title: "Meetup", description: "evening", date: "2026-09-12", startTime: "18:00:00", endTime: "20:00:00", ownerId: "{owner_id}", locationId: "{location_id}"}}) {{ id owner {{ username }} location {{ name }} }} }}"#
            ))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(data["addEvent"]["owner"]["username"], "ada");
        assert_eq!(data["addEvent"]["location"]["name"], "Office");

        // Deleting the owner leaves the event with a dangling reference that
        // resolves to null rather than an error.
        schema
            .execute(format!(r#"mutation {{ deleteAccount(id: "{owner_id}") {{ id }} }}"#))
            .await;
        let event_id = data["addEvent"]["id"].as_str().unwrap();
        let response = schema
            .execute(format!(r#"{{ event(id: "{event_id}") {{ owner {{ username }} }} }}"#))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert!(data["event"]["owner"].is_null());
    }

    #[tokio::test]
    async fn it_should_stream_a_created_account_to_an_attached_subscriber() {
        let (schema, state) = test_schema(SubscriptionFamily::EntityChanges);

        let mut stream =
            schema.execute_stream(r#"subscription { accountCreated { username email } }"#);
        let collector = tokio::spawn(async move { stream.next().await });
        while state.bus.attachment_count(topics::ACCOUNTS.created) == 0 {
            tokio::task::yield_now().await;
        }

        let response = schema
            .execute(
                r#"mutation { addAccount(input: {username: "ada", email: "ada@example.com"}) { id } }"#,
            )
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let item = collector
            .await
            .expect("join failed")
            .expect("subscription yielded nothing");
        assert!(item.errors.is_empty(), "{:?}", item.errors);
        let data = item.data.into_json().unwrap();
        assert_eq!(data["accountCreated"]["username"], "ada");
        assert_eq!(data["accountCreated"]["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn it_should_refuse_counter_subscriptions_when_changes_are_active() {
        let (schema, _) = test_schema(SubscriptionFamily::EntityChanges);

        let mut stream = schema.execute_stream("subscription { counter }");
        let response = stream.next().await.expect("expected an error response");
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("not enabled"));
    }

    #[tokio::test]
    async fn it_should_refuse_change_subscriptions_when_the_counter_is_active() {
        let (schema, _) = test_schema(SubscriptionFamily::Counter);

        let mut stream = schema.execute_stream("subscription { accountCreated { id } }");
        let response = stream.next().await.expect("expected an error response");
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("not enabled"));
    }

    #[tokio::test(start_paused = true)]
    async fn it_should_stream_the_counter_when_the_counter_family_is_active() {
        let (schema, _) = test_schema(SubscriptionFamily::Counter);

        let mut stream = schema.execute_stream("subscription { counter }");
        let first = stream.next().await.expect("stream ended");
        assert!(first.errors.is_empty(), "{:?}", first.errors);
        assert_eq!(first.data.into_json().unwrap()["counter"], 1);
        let second = stream.next().await.expect("stream ended");
        assert_eq!(second.data.into_json().unwrap()["counter"], 2);
    }

    #[tokio::test]
    async fn it_should_not_publish_mutations_while_the_counter_family_is_active() {
        let (schema, state) = test_schema(SubscriptionFamily::Counter);

        let mut created = changes::<Account>(&state.bus, topics::ACCOUNTS.created);
        let response = schema
            .execute(
                r#"mutation { addAccount(input: {username: "ada", email: "ada@example.com"}) { id } }"#,
            )
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert!(created.next().now_or_never().is_none());
    }
}
