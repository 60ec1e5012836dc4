mod components;
mod services;

use components::forms::BillForm;
use services::api::ApiClient;
use services::navigation;
use shared::{
    default_denomination_rows, validate_bill_form, BillFormError, BillFormSnapshot, LineItemRow,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    // Form state, read into a fresh snapshot on every submit attempt
    let customer_email = use_state(String::new);
    let rows = use_state(|| vec![LineItemRow::new()]);
    let denominations = use_state(default_denomination_rows);
    let paid_amount = use_state(String::new);

    // Outcome of the last validation pass / submission attempt
    let errors = use_state(Vec::<BillFormError>::new);
    let submitting = use_state(|| false);
    let submit_error = use_state(|| Option::<String>::None);

    let on_email_change = {
        let customer_email = customer_email.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            customer_email.set(input.value());
        })
    };

    let on_paid_amount_change = {
        let paid_amount = paid_amount.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            paid_amount.set(input.value());
        })
    };

    let on_code_change = {
        let rows = rows.clone();
        Callback::from(move |(index, value): (usize, String)| {
            let mut updated = (*rows).clone();
            if let Some(row) = updated.get_mut(index) {
                row.product_code = value;
                rows.set(updated);
            }
        })
    };

    let on_quantity_change = {
        let rows = rows.clone();
        Callback::from(move |(index, value): (usize, String)| {
            let mut updated = (*rows).clone();
            if let Some(row) = updated.get_mut(index) {
                row.quantity_input = value;
                rows.set(updated);
            }
        })
    };

    let on_add_row = {
        let rows = rows.clone();
        Callback::from(move |_| {
            let mut updated = (*rows).clone();
            updated.push(LineItemRow::new());
            rows.set(updated);
        })
    };

    let on_remove_row = {
        let rows = rows.clone();
        Callback::from(move |index: usize| {
            let mut updated = (*rows).clone();
            if index < updated.len() {
                updated.remove(index);
                rows.set(updated);
            }
        })
    };

    let on_count_change = {
        let denominations = denominations.clone();
        Callback::from(move |(value, input): (u32, String)| {
            let mut updated = (*denominations).clone();
            if let Some(row) = updated.iter_mut().find(|row| row.value == value) {
                row.count_input = input;
                denominations.set(updated);
            }
        })
    };

    // Validate-then-submit flow. The submitting flag doubles as the
    // re-entrancy guard: a second click while a request is in flight is
    // ignored until that request resolves or fails.
    let on_generate = {
        let customer_email = customer_email.clone();
        let rows = rows.clone();
        let denominations = denominations.clone();
        let paid_amount = paid_amount.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        let submit_error = submit_error.clone();

        Callback::from(move |_| {
            if *submitting {
                return;
            }

            // Drop everything the previous attempt rendered.
            errors.set(Vec::new());
            submit_error.set(None);

            let snapshot = BillFormSnapshot {
                customer_email: (*customer_email).clone(),
                rows: (*rows).clone(),
                denominations: (*denominations).clone(),
                paid_amount_input: (*paid_amount).clone(),
            };

            let validation = validate_bill_form(&snapshot);
            if !validation.is_valid {
                errors.set(validation.errors);
                return;
            }

            let request = match validation.to_request(&snapshot) {
                Some(request) => request,
                None => return,
            };

            submitting.set(true);

            let submitting = submitting.clone();
            let submit_error = submit_error.clone();
            spawn_local(async move {
                let api_client = ApiClient::new();
                let submitted_email = request.customer_email.clone();
                match api_client.generate_bill(&request).await {
                    Ok(response) => {
                        // Terminal: the form is abandoned for the preview page.
                        let email = response.customer_email.unwrap_or(submitted_email);
                        navigation::redirect_to(&navigation::preview_url(
                            &response.bill_id,
                            &email,
                        ));
                    }
                    Err(message) => {
                        submit_error.set(Some(message));
                        submitting.set(false);
                    }
                }
            });
        })
    };

    // Independent of bill validation: gated only on a non-empty email.
    let on_view_purchases = {
        let customer_email = customer_email.clone();
        Callback::from(move |_| {
            let email = (*customer_email).clone();
            if email.is_empty() {
                gloo::dialogs::alert("Enter customer email to view purchases.");
                return;
            }
            navigation::redirect_to(&navigation::purchases_url(&email));
        })
    };

    html! {
        <>
            <header class="header">
                <div class="container">
                    <h1>{"Supermarket Billing"}</h1>
                </div>
            </header>

            <main class="main">
                <div class="container">
                    <BillForm
                        customer_email={(*customer_email).clone()}
                        rows={(*rows).clone()}
                        denominations={(*denominations).clone()}
                        paid_amount={(*paid_amount).clone()}
                        errors={(*errors).clone()}
                        submitting={*submitting}
                        submit_error={(*submit_error).clone()}
                        on_email_change={on_email_change}
                        on_paid_amount_change={on_paid_amount_change}
                        on_code_change={on_code_change}
                        on_quantity_change={on_quantity_change}
                        on_add_row={on_add_row}
                        on_remove_row={on_remove_row}
                        on_count_change={on_count_change}
                        on_generate={on_generate}
                        on_view_purchases={on_view_purchases}
                    />
                </div>
            </main>
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
