use yew::prelude::*;

use crate::minesweeper::MinesweeperView;
use crate::snake::SnakeView;

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct DeskProps {
    /// Fixed seed for both games, random when absent
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[function_component]
pub(crate) fn Desk(props: &DeskProps) -> Html {
    let seed = props.seed;
    html! {
        <main class="desk">
            <section class="window" id="minesweeper-app">
                <header>{"Minesweeper"}</header>
                <MinesweeperView {seed}/>
            </section>
            <section class="window" id="snake-app">
                <header>{"Snake"}</header>
                <SnakeView {seed}/>
            </section>
        </main>
    }
}
