use crate::cart_actor::{self, ReplaceOutcome};
use crate::catalog_actor::{self, CatalogError};
use crate::clients::{CartClient, CatalogClient};
use crate::config::Settings;
use crate::coordinator::{CartError, MutationCoordinator};
use crate::debounce::SearchDebounce;
use crate::model::{CartView, Notice, Product, Session};
use crate::notifier::Notifier;
use crate::reconciler;
use crate::store::{CartStore, CatalogSource};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// The runtime orchestrator for one user session's cart and catalog.
///
/// `CartSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the Catalog and Cart actors
///   and the task that republishes the [`CartView`]
/// - **Dependency Wiring**: handing the remote store to the actors and the coordinator
///
/// # Example
///
/// ```ignore
/// let backend = Arc::new(HttpBackend::new(&settings.endpoint));
/// let mut system = CartSystem::new(backend, &settings);
///
/// system.load_catalog().await?;
/// system.refresh_cart(&session).await?;
/// system.coordinator.add_to_cart(&session, &product_id).await?;
/// system.search.on_query_change("phone").await?;
///
/// println!("{:?}", system.view().summary);
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Client for the Catalog actor (displayed product list).
    pub catalog: CatalogClient,

    /// Client for the Cart actor (local copy of the raw cart).
    pub cart: CartClient,

    /// Entry point for every cart mutation.
    pub coordinator: MutationCoordinator,

    /// Debounced search input.
    pub search: SearchDebounce,

    notifier: Notifier,
    view: watch::Receiver<CartView>,

    /// Actor and publisher tasks, awaited on shutdown.
    handles: Vec<JoinHandle<()>>,
}

impl CartSystem {
    /// Starts the system against a backend that serves both the catalog and the cart.
    pub fn new<B>(backend: Arc<B>, settings: &Settings) -> Self
    where
        B: CatalogSource + CartStore + 'static,
    {
        let source: Arc<dyn CatalogSource> = backend.clone();
        let store: Arc<dyn CartStore> = backend;
        Self::with_sources(source, store, settings)
    }

    /// Starts the system with separate catalog and cart backends.
    pub fn with_sources(
        source: Arc<dyn CatalogSource>,
        store: Arc<dyn CartStore>,
        settings: &Settings,
    ) -> Self {
        // 1. Create actors
        let (catalog_actor, catalog) = catalog_actor::new(settings.mailbox_capacity);
        let (cart_actor, cart) = cart_actor::new(settings.mailbox_capacity);

        // 2. Start actors with injected context
        let catalog_handle = tokio::spawn(catalog_actor.run(source));
        let cart_handle = tokio::spawn(cart_actor.run(()));

        // 3. The view follows both actors until they stop
        let (view_tx, view) = watch::channel(CartView::default());
        let view_handle = tokio::spawn(reconciler::republish(
            cart.subscribe(),
            catalog.subscribe(),
            view_tx,
        ));

        let notifier = Notifier::default();
        let coordinator = MutationCoordinator::new(store, cart.clone(), notifier.clone());
        let search = SearchDebounce::new(catalog.clone(), settings.debounce());

        info!(endpoint = %settings.endpoint, "Cart system started");
        Self {
            catalog,
            cart,
            coordinator,
            search,
            notifier,
            view,
            handles: vec![catalog_handle, cart_handle, view_handle],
        }
    }

    /// Shows the full catalog.
    pub async fn load_catalog(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        self.catalog.show_all().await
    }

    /// Loads the server-held cart for `session`; a no-op without a token.
    pub async fn refresh_cart(&self, session: &Session) -> Result<Option<ReplaceOutcome>, CartError> {
        self.coordinator.refresh(session).await
    }

    /// The most recently published cart view.
    pub fn view(&self) -> CartView {
        self.view.borrow().clone()
    }

    /// Joins the actors' current state directly, without waiting for the publisher.
    pub async fn current_view(&self) -> Result<CartView, CartError> {
        let entries = self.cart.snapshot().await?;
        let products = self
            .catalog
            .snapshot()
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))?;
        Ok(reconciler::build_view(&entries, &products))
    }

    pub fn subscribe_view(&self) -> watch::Receiver<CartView> {
        self.view.clone()
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notifier.subscribe()
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes the actor mailboxes; each actor drains what
    /// is queued and exits, which in turn ends the view publisher. Clones of
    /// the clients held elsewhere keep their actor alive, so drop them first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if every task finished cleanly
    /// - `Err(JoinError)` for the first task that panicked
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down cart system...");

        let Self {
            catalog,
            cart,
            coordinator,
            search,
            notifier,
            view,
            handles,
        } = self;
        drop(search);
        drop(coordinator);
        drop(catalog);
        drop(cart);
        drop(notifier);
        drop(view);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Task failed: {:?}", e);
                return Err(e);
            }
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}
