use shared::{BillFormError, DenominationRow, LineItemRow};
use yew::prelude::*;

use crate::components::forms::denomination_panel::DenominationPanel;
use crate::components::forms::line_item_editor::LineItemEditor;
use crate::components::validation_summary::ValidationSummary;

#[derive(Properties, PartialEq)]
pub struct BillFormProps {
    // Form state
    pub customer_email: String,
    pub rows: Vec<LineItemRow>,
    pub denominations: Vec<DenominationRow>,
    pub paid_amount: String,
    pub errors: Vec<BillFormError>,
    pub submitting: bool,
    pub submit_error: Option<String>,

    // Event handlers
    pub on_email_change: Callback<Event>,
    pub on_paid_amount_change: Callback<Event>,
    pub on_code_change: Callback<(usize, String)>,
    pub on_quantity_change: Callback<(usize, String)>,
    pub on_add_row: Callback<()>,
    pub on_remove_row: Callback<usize>,
    pub on_count_change: Callback<(u32, String)>,
    pub on_generate: Callback<()>,
    pub on_view_purchases: Callback<()>,
}

/// The whole bill-creation form plus its result area. All state lives in
/// the app root; this component only renders and forwards events.
#[function_component(BillForm)]
pub fn bill_form(props: &BillFormProps) -> Html {
    let paid_amount_invalid = props
        .errors
        .iter()
        .any(|error| matches!(error, BillFormError::PaidAmountInvalid));

    let onsubmit = {
        let on_generate = props.on_generate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_generate.emit(());
        })
    };
    let on_view_purchases = {
        let on_view_purchases = props.on_view_purchases.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_view_purchases.emit(());
        })
    };

    html! {
        <section class="billing-section">
            <form class="billing-form" onsubmit={onsubmit}>
                <div class="form-group">
                    <label for="customer_email">{"Customer Email"}</label>
                    <input
                        type="text"
                        id="customer_email"
                        placeholder="customer@example.com"
                        value={props.customer_email.clone()}
                        onchange={props.on_email_change.clone()}
                        disabled={props.submitting}
                    />
                </div>

                <h3>{"Products"}</h3>
                <LineItemEditor
                    rows={props.rows.clone()}
                    errors={props.errors.clone()}
                    disabled={props.submitting}
                    on_code_change={props.on_code_change.clone()}
                    on_quantity_change={props.on_quantity_change.clone()}
                    on_add={props.on_add_row.clone()}
                    on_remove={props.on_remove_row.clone()}
                />

                <h3>{"Cash Denominations"}</h3>
                <DenominationPanel
                    denominations={props.denominations.clone()}
                    errors={props.errors.clone()}
                    disabled={props.submitting}
                    on_count_change={props.on_count_change.clone()}
                />

                <div class="form-group">
                    <label for="paid_amount">{"Paid Amount"}</label>
                    <input
                        type="number"
                        id="paid_amount"
                        step="0.01"
                        min="0"
                        class={if paid_amount_invalid { "input-error" } else { "" }}
                        value={props.paid_amount.clone()}
                        onchange={props.on_paid_amount_change.clone()}
                        disabled={props.submitting}
                    />
                </div>

                <div class="form-actions">
                    <button
                        type="submit"
                        id="generate-bill"
                        class="btn btn-primary"
                        disabled={props.submitting}
                    >
                        {if props.submitting { "Processing..." } else { "Generate Bill" }}
                    </button>
                    <button type="button" id="view-purchases" class="btn" onclick={on_view_purchases}>
                        {"View Purchases"}
                    </button>
                </div>
            </form>

            <div id="result">
                {if !props.errors.is_empty() {
                    html! { <ValidationSummary errors={props.errors.clone()} /> }
                } else if props.submitting {
                    html! { <div class="processing">{"Processing..."}</div> }
                } else if let Some(error) = props.submit_error.as_ref() {
                    html! { <div class="form-message error">{error}</div> }
                } else {
                    html! {}
                }}
            </div>
        </section>
    }
}
