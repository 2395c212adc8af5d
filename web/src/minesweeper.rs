use bitflags::bitflags;
use chrono::prelude::*;
use gloo::timers::callback::Interval;
use retrodesk_core as game;
use yew::prelude::*;

use crate::utils::*;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

/// Wall-clock bounds of a game, for the elapsed-time counter.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct GameClock {
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl GameClock {
    fn on_successful_move(&mut self, finished: bool, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        if finished && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        (self.ended_at.unwrap_or(now) - started_at)
            .num_seconds()
            .max(0) as u32
    }
}

fn format_for_counter(num: i32) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CellPointerState {
    pos: game::Coord2,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    Update(CellPointerState),
    Leave,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    UpdateTime,
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    view: game::CellView,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(BoardCell)]
fn board_cell(props: &CellProps) -> Html {
    use game::CellView::*;

    let CellProps {
        row,
        col,
        view,
        pressed,
        callback,
    } = props.clone();

    let mut class = classes!(
        "cell",
        match view {
            Hidden => classes!(),
            Flagged => classes!("flag"),
            Revealed(0) => classes!("revealed"),
            Revealed(count) => classes!("revealed", format!("num-{}", count)),
            Mine => classes!("revealed", "mine"),
            TriggeredMine => classes!("revealed", "mine", "oops"),
        }
    );
    if pressed {
        class.push("revealed");
    }
    let label = match view {
        Revealed(count) if count > 0 => count.to_string(),
        _ => String::new(),
    };

    let pointer = |leave: bool| {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            log::trace!("({}, {}) pointer {:?}", row, col, buttons);
            callback.emit(if leave {
                CellMsg::Leave
            } else {
                CellMsg::Update(CellPointerState {
                    pos: (row, col),
                    buttons,
                })
            });
        })
    };

    html! {
        <td
            {class}
            onmousedown={pointer(false)}
            onmouseup={pointer(false)}
            onmouseenter={pointer(false)}
            onmouseleave={pointer(true)}
        >
            {label}
        </td>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct MinesweeperProps {
    #[prop_or_default]
    pub seed: Option<u64>,
    #[prop_or_default]
    pub config: game::BoardConfig,
}

#[derive(Debug)]
pub(crate) struct MinesweeperView {
    engine: game::MinesweeperEngine,
    clock: GameClock,
    prev_time: u32,
    current_pointer: Option<CellPointerState>,
    _timer_interval: Interval,
}

impl MinesweeperView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }

    fn apply(&mut self, input: game::BoardInput) -> bool {
        let updated = self.engine.apply(input);
        if updated {
            self.clock
                .on_successful_move(self.engine.is_finished(), utc_now());
        }
        updated
    }

    fn is_mid_reveal(&self) -> bool {
        matches!(
            self.current_pointer,
            Some(CellPointerState {
                buttons: MouseButtons::LEFT,
                ..
            })
        )
    }

    fn status_class(&self) -> &'static str {
        use game::BoardStatus::*;
        match self.engine.status() {
            Idle | Running if self.is_mid_reveal() => "mid-open",
            Idle => "not-started",
            Running => "in-progress",
            Won => "win",
            Lost => "lose",
        }
    }

    fn is_pressed(&self, coords: game::Coord2, view: game::CellView) -> bool {
        !self.engine.is_finished()
            && view == game::CellView::Hidden
            && matches!(
                self.current_pointer,
                Some(CellPointerState {
                    pos,
                    buttons: MouseButtons::LEFT,
                }) if pos == coords
            )
    }
}

impl Component for MinesweeperView {
    type Message = Msg;
    type Properties = MinesweeperProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let engine = game::MinesweeperEngine::new(props.config, seed_or_random(props.seed))
            .unwrap_or_else(|err| {
                log::error!("invalid board config {:?}: {}", props.config, err);
                game::MinesweeperEngine::new(game::BoardConfig::classic(), js_random_seed())
                    .expect("classic preset is valid")
            });
        Self {
            engine,
            clock: GameClock::default(),
            prev_time: 0,
            current_pointer: None,
            _timer_interval: MinesweeperView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Leave) => self.current_pointer.take().is_some(),
            CellEvent(Update(pointer)) if pointer.buttons.is_empty() => {
                match self.current_pointer.take() {
                    None => false,
                    Some(CellPointerState { pos, buttons }) => {
                        match buttons {
                            MouseButtons::LEFT => {
                                log::debug!("reveal cell: {:?}", pos);
                                self.apply(game::BoardInput::Reveal(pos));
                            }
                            MouseButtons::RIGHT => {
                                log::debug!("flag cell: {:?}", pos);
                                self.apply(game::BoardInput::ToggleFlag(pos));
                            }
                            // chorded buttons cancel the press
                            _ => {}
                        }
                        true
                    }
                }
            }
            CellEvent(Update(pointer)) => match self.current_pointer.replace(pointer) {
                None => true,
                Some(previous) => previous != pointer,
            },
            UpdateTime => {
                let time = self.clock.elapsed_secs(utc_now());
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            NewGame => {
                self.engine.restart();
                self.clock = GameClock::default();
                self.prev_time = 0;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (rows, cols) = self.engine.size();
        let mines_left = format_for_counter(self.engine.mines_left() as i32);
        let elapsed_time = format_for_counter(self.clock.elapsed_secs(utc_now()) as i32);
        let status = self.engine.status().message().unwrap_or_default();

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <div class="minesweeper" oncontextmenu={Callback::from(|e: MouseEvent| e.prevent_default())}>
                <nav>
                    <aside>{mines_left}</aside>
                    <span><button class={self.status_class()} onclick={cb_new_game}/></span>
                    <aside>{elapsed_time}</aside>
                </nav>
                <table class={(!self.engine.is_finished()).then_some("playable")}>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let view = self.engine.cell_view((row, col));
                                        let pressed = self.is_pressed((row, col), view);
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <BoardCell {row} {col} {view} {pressed} {callback}/>
                                        }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn counter_is_clamped_to_three_digits() {
        assert_eq!(format_for_counter(-150), "-99");
        assert_eq!(format_for_counter(-5), "-05");
        assert_eq!(format_for_counter(7), "007");
        assert_eq!(format_for_counter(1200), "999");
    }

    #[test]
    fn clock_runs_from_first_move_until_finish() {
        let mut clock = GameClock::default();
        assert_eq!(clock.elapsed_secs(at(100)), 0);

        clock.on_successful_move(false, at(10));
        assert_eq!(clock.elapsed_secs(at(25)), 15);

        clock.on_successful_move(true, at(40));
        clock.on_successful_move(true, at(90));
        assert_eq!(clock.elapsed_secs(at(500)), 30);
    }
}
