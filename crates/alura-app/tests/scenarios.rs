//! End-to-end storefront scenarios driven by a manual clock.

use std::time::Duration;

use alura_app::prelude::*;
use alura_app::{RecordingViewport, ITEM_ADDED, ORDER_CONFIRMATION};
use alura_cache::{Cache, KvBackend, MemoryBackend};
use alura_commerce::prelude::*;
use alura_executor::ManualClock;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn id(n: u32) -> ProductId {
    ProductId::new(n)
}

struct Harness {
    storefront: Storefront,
    clock: ManualClock,
    backend: MemoryBackend,
    viewport: RecordingViewport,
}

impl Harness {
    fn new() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    fn with_backend(backend: MemoryBackend) -> Self {
        let clock = ManualClock::new();
        let viewport = RecordingViewport::new();
        let storefront = Storefront::builder(StorefrontConfig::default())
            .cache(Cache::new(backend.clone()))
            .clock(clock.clone())
            .viewport(viewport.clone())
            .build()
            .unwrap();
        Self {
            storefront,
            clock,
            backend,
            viewport,
        }
    }

    fn wait(&mut self, by: Duration) {
        self.clock.advance(by);
        self.storefront.advance();
    }

    fn lines(&self) -> Vec<(u32, u32)> {
        self.storefront
            .cart()
            .cart()
            .lines()
            .iter()
            .map(|l| (l.id.get(), l.quantity))
            .collect()
    }

    fn stored(&self) -> String {
        let bytes = self.backend.get(DEFAULT_CART_KEY).unwrap().unwrap();
        String::from_utf8(bytes).unwrap()
    }
}

#[test]
fn scenario_a_first_add() {
    let mut h = Harness::new();
    h.storefront.dispatch(Action::AddToCart(id(101)));

    assert_eq!(h.lines(), vec![(101, 1)]);
    assert_eq!(h.storefront.cart().subtotal(), Money::new(4900));
    assert_eq!(h.stored(), r#"[{"id":101,"quantity":1}]"#);
}

#[test]
fn scenario_b_repeat_add() {
    let mut h = Harness::new();
    h.storefront.dispatch(Action::AddToCart(id(101)));
    h.storefront.dispatch(Action::AddToCart(id(101)));

    assert_eq!(h.lines(), vec![(101, 2)]);
    assert_eq!(h.storefront.cart().subtotal(), Money::new(9800));
}

#[test]
fn scenario_c_decrement_removes_line() {
    let mut h = Harness::new();
    h.storefront.dispatch(Action::AddToCart(id(101)));
    h.storefront
        .dispatch(Action::UpdateQuantity { id: id(101), delta: -1 });

    assert!(h.lines().is_empty());
    assert_eq!(h.storefront.cart().subtotal(), Money::zero());
    assert_eq!(h.stored(), "[]");
}

#[test]
fn scenario_d_totals() {
    let totals = PricingPolicy::default().totals(Money::new(10000));
    assert_eq!(totals.tax, Money::new(500));
    assert_eq!(totals.shipping, Money::new(750));
    assert_eq!(totals.total, Money::new(11250));
}

#[test]
fn scenario_e_empty_cart_totals() {
    let h = Harness::new();
    let view = h.storefront.view();
    assert_eq!(view.totals.subtotal, Money::zero());
    assert_eq!(view.totals.shipping, Money::zero());
    assert_eq!(view.totals.total, Money::zero());
    assert_eq!(view.checkout, CheckoutView::EmptyPrompt);
    assert!(!view.can_checkout());
}

#[test]
fn scenario_f_submit_order() {
    let mut h = Harness::new();
    h.storefront.dispatch(Action::AddToCart(id(102)));
    h.storefront.dispatch(Action::AddToCart(id(103)));
    h.storefront.dispatch(Action::Navigate(Page::Checkout));
    assert_eq!(h.storefront.view().checkout, CheckoutView::Form);

    h.wait(ms(500));
    let result = h
        .storefront
        .dispatch(Action::SubmitOrder { form_complete: true });
    let Some(CheckoutOutcome::Submitted(receipt)) = result.checkout else {
        panic!("order was not submitted: {:?}", result.checkout);
    };
    assert_eq!(receipt.totals.subtotal, Money::new(23400));

    assert!(h.lines().is_empty());
    assert_eq!(h.stored(), "[]");
    let notification = h.storefront.notification().unwrap();
    assert_eq!(notification.message, ORDER_CONFIRMATION);
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(h.storefront.page(), Page::Checkout);

    h.wait(ms(99));
    assert_eq!(h.storefront.page(), Page::Checkout);
    h.wait(ms(1));
    assert_eq!(h.storefront.page(), Page::Home);

    // The confirmation outlives the redirect.
    assert_eq!(
        h.storefront.notification().unwrap().phase,
        NotificationPhase::Visible
    );
    h.wait(ms(3200));
    assert!(h.storefront.notification().is_none());
}

#[test]
fn incomplete_form_is_not_submitted() {
    let mut h = Harness::new();
    h.storefront.dispatch(Action::AddToCart(id(105)));
    h.storefront.dispatch(Action::Navigate(Page::Checkout));

    let mut form = CheckoutForm::new();
    form.set_field("email", "shopper@example.com").unwrap();
    let result = h.storefront.dispatch(Action::submit_form(&form));

    assert_eq!(result.checkout, Some(CheckoutOutcome::IncompleteForm));
    assert_eq!(h.lines(), vec![(105, 1)]);
}

#[test]
fn newer_notification_is_not_cleared_by_older_timer() {
    let mut h = Harness::new();
    h.storefront.dispatch(Action::AddToCart(id(101)));

    h.wait(ms(2000));
    h.storefront
        .dispatch(Action::ShowNotification {
            message: "Contact us: support@alura.com".into(),
            kind: NotificationKind::Success,
        });

    // First notification's dismissal would have been due at 3000 ms.
    h.wait(ms(1500));
    let current = h.storefront.notification().unwrap();
    assert_eq!(current.message, "Contact us: support@alura.com");
    assert_eq!(current.phase, NotificationPhase::Visible);

    h.wait(ms(1500));
    assert_eq!(h.storefront.notification().unwrap().phase, NotificationPhase::Fading);
    h.wait(ms(300));
    assert!(h.storefront.notification().is_none());
}

#[test]
fn late_advance_runs_chained_timers() {
    let mut h = Harness::new();
    h.storefront.dispatch(Action::AddToCart(id(101)));
    assert_eq!(h.storefront.notification().unwrap().message, ITEM_ADDED);

    // One late tick covers both the fade and the removal.
    h.clock.advance(ms(10_000));
    assert_eq!(h.storefront.advance(), 2);
    assert!(h.storefront.notification().is_none());
    assert_eq!(h.storefront.next_timer_deadline(), None);
}

#[test]
fn every_navigation_scrolls_to_top() {
    let mut h = Harness::new();
    h.storefront.dispatch(Action::Navigate(Page::About));
    h.storefront.dispatch(Action::Navigate(Page::Checkout));
    h.storefront.dispatch(Action::Navigate(Page::Home));

    assert_eq!(h.viewport.requests(), vec![ScrollRequest::TopSmooth; 3]);
}

#[test]
fn cart_survives_restart() {
    let backend = MemoryBackend::new();
    {
        let mut h = Harness::with_backend(backend.clone());
        h.storefront.dispatch(Action::AddToCart(id(104)));
        h.storefront.dispatch(Action::AddToCart(id(106)));
        h.storefront
            .dispatch(Action::UpdateQuantity { id: id(104), delta: 2 });
    }

    let h = Harness::with_backend(backend);
    assert_eq!(h.lines(), vec![(104, 3), (106, 1)]);
    assert_eq!(h.storefront.view().item_count, 4);
}

#[test]
fn corrupt_storage_starts_empty() {
    let backend = MemoryBackend::new();
    backend.set(DEFAULT_CART_KEY, b"not json at all").unwrap();

    let h = Harness::with_backend(backend);
    assert!(h.lines().is_empty());
}

#[test]
fn stale_lines_are_kept_but_not_priced() {
    let backend = MemoryBackend::new();
    backend
        .set(DEFAULT_CART_KEY, br#"[{"id":101,"quantity":1},{"id":555,"quantity":4}]"#)
        .unwrap();

    let h = Harness::with_backend(backend);
    let view = h.storefront.view();
    assert_eq!(h.lines(), vec![(101, 1), (555, 4)]);
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.totals.subtotal, Money::new(4900));
}
