use gloo::timers::callback::Interval;
use retrodesk_core::{
    self as game, Direction, HighScore, KeyValueStore, Position, SnakeListener, SnakeStatus,
};
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::utils::*;

/// Writes every new best score straight to storage.
#[derive(Debug, Default)]
pub(crate) struct HighScoreSink<S> {
    store: S,
}

impl<S: KeyValueStore> SnakeListener for HighScoreSink<S> {
    fn on_high_score(&mut self, high_score: u32) {
        if let Err(err) = HighScore::save(&mut self.store, high_score) {
            log::error!("Could not save high score: {}", err);
        }
    }

    fn on_status(&mut self, status: SnakeStatus) {
        log::debug!("snake status: {:?}", status);
    }
}

type Session = game::SnakeSession<Interval, HighScoreSink<LocalStore>>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start,
    Stop,
    Tick,
    Turn(Direction),
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct SnakeProps {
    #[prop_or_default]
    pub seed: Option<u64>,
    #[prop_or_default]
    pub config: game::SnakeConfig,
}

/// Steering key for a running game. Keys are left alone otherwise so the page keeps scrolling.
fn steering_key(key: &str, running: bool) -> Option<Direction> {
    running.then(|| key.parse().ok()).flatten()
}

pub(crate) struct SnakeView {
    session: Session,
    board: NodeRef,
}

impl SnakeView {
    fn focus_board(&self) {
        if let Some(board) = self.board.cast::<HtmlElement>() {
            if let Err(err) = board.focus() {
                log::warn!("Could not focus snake board: {:?}", err);
            }
        }
    }

    fn cell_class(&self, pos: Position) -> Classes {
        let engine = self.session.engine();
        if engine.head() == pos {
            classes!("tile", "snake", "head")
        } else if engine.is_occupied(pos) {
            classes!("tile", "snake")
        } else if engine.food() == pos {
            classes!("tile", "food")
        } else {
            classes!("tile")
        }
    }
}

impl Component for SnakeView {
    type Message = Msg;
    type Properties = SnakeProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let high_score = HighScore::load(&LocalStore);
        let sink = HighScoreSink { store: LocalStore };
        let seed = seed_or_random(props.seed);
        let engine = game::SnakeEngine::with_listener(props.config.clone(), seed, sink)
            .unwrap_or_else(|err| {
                log::error!("invalid snake config {:?}: {}", props.config, err);
                game::SnakeEngine::with_listener(
                    game::SnakeConfig::default(),
                    js_random_seed(),
                    HighScoreSink { store: LocalStore },
                )
                .expect("default snake config is valid")
            })
            .with_high_score(high_score);
        log::debug!("loaded snake high score: {}", high_score);

        Self {
            session: game::SnakeSession::new(engine),
            board: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Start => {
                let link = ctx.link().clone();
                self.session.restart(move |period| {
                    Interval::new(period, move || link.send_message(Tick))
                });
                self.focus_board();
                true
            }
            Stop => self.session.stop(),
            Tick => self.session.tick().has_update(),
            // the board only moves on ticks, so a turn alone never needs a redraw
            Turn(direction) => {
                if self.session.engine().status().is_running() {
                    self.session.turn(direction);
                }
                false
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if self.session.stop() {
            log::debug!("snake window closed, timer cancelled");
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let engine = self.session.engine();
        let tile_count = engine.config().tile_count();
        let status = engine.status().message().unwrap_or_default();
        let running = engine.status().is_running();
        let onkeydown = ctx.link().batch_callback(move |event: KeyboardEvent| {
            let direction = steering_key(&event.key(), running)?;
            event.prevent_default();
            Some(Msg::Turn(direction))
        });

        html! {
            <div class="snake">
                <nav>
                    <span>{"Score: "}<output>{engine.score()}</output></span>
                    <span>{"High: "}<output>{engine.high_score()}</output></span>
                    <button onclick={ctx.link().callback(|_: MouseEvent| Msg::Start)}>{"Start"}</button>
                    <button disabled={!running} onclick={ctx.link().callback(|_: MouseEvent| Msg::Stop)}>{"Stop"}</button>
                </nav>
                <table ref={self.board.clone()} tabindex="0" {onkeydown} class={running.then_some("running")}>
                    {
                        for (0..tile_count).map(|y| html! {
                            <tr>
                                {
                                    for (0..tile_count).map(|x| html! {
                                        <td class={self.cell_class(Position::new(x, y))}/>
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                <p class="status">{status}</p>
            </div>
        }
    }
}
