use std::sync::{Arc, RwLock};

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use tracing::{info, warn};

pub mod clock;
pub mod country;
pub mod demographics;
pub mod error;
pub mod events;
pub mod geoeconomics;
pub mod localization;
pub mod node;
pub mod observer;
pub mod registry;
pub mod resources;
pub mod seed;
pub mod systems;
pub mod war;

pub use clock::*;
pub use country::*;
pub use demographics::*;
pub use error::*;
pub use events::*;
pub use geoeconomics::*;
pub use localization::*;
pub use node::*;
pub use observer::*;
pub use registry::*;
pub use resources::*;
pub use seed::*;
pub use systems::*;
pub use war::*;

pub struct SimulationWorld {
    world: World,
    schedule: Schedule,
    observer: Arc<RwLock<ObserverSnapshot>>,
}

impl SimulationWorld {
    pub fn new(config: SimulationConfig, seed: &WorldSeed) -> Self {
        Self::with_observer(config, seed, Arc::new(RwLock::new(ObserverSnapshot::default())))
    }

    pub fn with_observer(
        config: SimulationConfig,
        seed: &WorldSeed,
        observer: Arc<RwLock<ObserverSnapshot>>,
    ) -> Self {
        let (registry, alliances) = build_world(seed, &config);
        Self::from_registries(config, registry, alliances, observer)
    }

    /// Builds a simulation around prepared registries.
    pub fn from_registries(
        config: SimulationConfig,
        registry: CountryRegistry,
        alliances: AllianceRegistry,
        observer: Arc<RwLock<ObserverSnapshot>>,
    ) -> Self {
        for gap in alliances.reference_gaps(&registry) {
            warn!(error = %gap, "alliance member will be skipped");
        }

        let start_date = config.start_date;
        let mut events = WorldEventLog::new(
            config.event_capacity,
            config.news_capacity,
            config.log_capacity,
        );
        events.push(WorldEvent::new(
            0,
            start_date,
            WorldEventKind::WorldInitialized {
                countries: registry.len(),
            },
        ));
        info!(
            countries = registry.len(),
            nodes = registry.nodes().len(),
            alliances = alliances.len(),
            "simulation initialized on {}",
            start_date
        );

        let mut world = World::default();
        world.insert_resource(config);
        world.insert_resource(WorldTime::default());
        world.insert_resource(WorldCalendar { date: start_date });
        world.insert_resource(registry);
        world.insert_resource(alliances);
        world.insert_resource(ActiveWars::default());
        world.insert_resource(events);

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                clock_system,
                country_turn_system,
                war_resolution_system,
                logging_system,
            )
                .chain(),
        );

        let mut simulation = Self {
            world,
            schedule,
            observer,
        };
        simulation.refresh_observer_snapshot();
        simulation
    }

    pub fn tick(&mut self) {
        {
            let mut time = self.world.resource_mut::<WorldTime>();
            time.tick += 1;
        }

        self.schedule.run(&mut self.world);
        self.refresh_observer_snapshot();
    }

    /// Declares a war by country code outside the random trigger, as an
    /// external driver would.
    pub fn declare_war(&mut self, initiator: &str, target: &str) -> Result<()> {
        let tick = self.tick_count();
        let date = self.date();
        let war = {
            let registry = self.world.resource::<CountryRegistry>();
            let alliances = self.world.resource::<AllianceRegistry>();
            let initiator = registry.resolve(initiator)?;
            let target = registry.resolve(target)?;
            declare_war(registry, alliances, initiator, target)?.dated(date)
        };

        let kind = {
            let registry = self.world.resource::<CountryRegistry>();
            WorldEventKind::WarDeclared {
                initiator: registry.name_of(war.attackers[0]).to_string(),
                target: registry.name_of(war.defenders[0]).to_string(),
                attackers: war.attackers.len(),
                defenders: war.defenders.len(),
            }
        };
        self.world
            .resource_mut::<WorldEventLog>()
            .push(WorldEvent::new(tick, date, kind));
        self.world.resource_mut::<ActiveWars>().push(war);
        self.refresh_observer_snapshot();
        Ok(())
    }

    pub fn tick_count(&self) -> u64 {
        self.world.resource::<WorldTime>().tick
    }

    pub fn date(&self) -> CalendarDate {
        self.world.resource::<WorldCalendar>().date
    }

    pub fn config(&self) -> &SimulationConfig {
        self.world.resource::<SimulationConfig>()
    }

    pub fn countries(&self) -> &CountryRegistry {
        self.world.resource::<CountryRegistry>()
    }

    pub fn alliances(&self) -> &AllianceRegistry {
        self.world.resource::<AllianceRegistry>()
    }

    pub fn active_wars(&self) -> &ActiveWars {
        self.world.resource::<ActiveWars>()
    }

    pub fn events(&self) -> &WorldEventLog {
        self.world.resource::<WorldEventLog>()
    }

    pub fn observer(&self) -> Arc<RwLock<ObserverSnapshot>> {
        self.observer.clone()
    }

    fn refresh_observer_snapshot(&mut self) {
        let snapshot = ObserverSnapshot::capture(
            self.tick_count(),
            self.date(),
            self.world.resource::<CountryRegistry>(),
            self.world.resource::<ActiveWars>(),
            self.world.resource::<WorldEventLog>(),
        );

        if let Ok(mut observer) = self.observer.write() {
            *observer = snapshot;
        }
    }
}
