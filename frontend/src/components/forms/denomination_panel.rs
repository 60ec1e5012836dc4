use shared::{BillFormError, DenominationRow};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DenominationPanelProps {
    pub denominations: Vec<DenominationRow>,
    pub errors: Vec<BillFormError>,
    pub disabled: bool,
    pub on_count_change: Callback<(u32, String)>,
}

/// Fixed set of denomination count inputs, one per note value in
/// descending order. Untouched inputs read back as zero.
#[function_component(DenominationPanel)]
pub fn denomination_panel(props: &DenominationPanelProps) -> Html {
    html! {
        <div id="denominations">
            {for props.denominations.iter().map(|row| {
                let value = row.value;
                let invalid = props
                    .errors
                    .iter()
                    .any(|error| error.denomination_value() == Some(value));
                let on_count_change = {
                    let on_count_change = props.on_count_change.clone();
                    Callback::from(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        on_count_change.emit((value, input.value()));
                    })
                };

                html! {
                    <div class="denom">
                        <label>
                            {format!("₹{}: ", value)}
                            <input
                                type="number"
                                class={if invalid { "denom-count input-error" } else { "denom-count" }}
                                min="0"
                                value={row.count_input.clone()}
                                onchange={on_count_change}
                                disabled={props.disabled}
                            />
                        </label>
                        {if invalid {
                            html! { <div class="field-error-msg">{"Count must be 0 or more"}</div> }
                        } else { html! {} }}
                    </div>
                }
            })}
        </div>
    }
}
