//! The cards the academy posts at each point of a session.

use crate::notify::{Message, Notification, Tone};
use crate::training::{Mode, Session, UserId};

pub fn session_started(trainee: &UserId, session: &Session) -> Message {
    let (instructions, tone) = match session.mode {
        Mode::Delivery => (
            format!(
                "**Hi {mention}! Welcome to Delivery Training! 🚚**\n\n\
                 A fresh order just finished in the kitchen:\n\
                 🍩 **Item:** {item}\n\
                 🆔 **ID:** `{id}`\n\n\
                 **Your Goal:** Grab this order and get it to the customer!\n\
                 👉 **Type:** `/deliver` to start dispatch.",
                mention = trainee.mention(),
                item = session.item,
                id = session.order_id,
            ),
            Tone::Wait,
        ),
        Mode::Cook | Mode::Full => (
            format!(
                "**Hi {mention}! Welcome to the Kitchen! 👨‍🍳**\n\n\
                 A new ticket just popped up on the screen:\n\
                 🍩 **Item:** {item}\n\
                 🆔 **ID:** `{id}`\n\n\
                 **Your Goal:** Accept this order and make it delicious!\n\
                 👉 **Type:** `/claim` to accept the ticket.",
                mention = trainee.mention(),
                item = session.item,
                id = session.order_id,
            ),
            Tone::Brand,
        ),
    };

    Message::card(Notification::new("Training Session Started", instructions, tone))
        .with_content(format!("{} 👋 **Let's get started!**", trainee.mention()))
}

pub fn ticket_claimed(session: &Session) -> Message {
    Message::card(Notification::new(
        "✅ Ticket Accepted!",
        format!(
            "Awesome! You've assigned the order (**{}**) to yourself.\n\n\
             **Next Step:** It's time to bake! 🥐\n\
             👉 **Type:** `/cook image:[attach_any_image]`",
            session.item
        ),
        Tone::Success,
    ))
}

pub fn cooking_started(session: &Session, delay_secs: u64) -> Message {
    Message::card(Notification::new(
        "🔥 Cooking in progress...",
        format!(
            "Mixing the ingredients for **{}**... smells good! 😋\n*(Waiting {delay_secs} seconds...)*",
            session.item
        ),
        Tone::Brand,
    ))
}

/// Cook-only track finished; addressed to the instructor.
pub fn cooking_passed(trainee: &UserId, session: &Session) -> Message {
    Message::card(Notification::new(
        "🎉 Cooking Training Passed!",
        format!(
            "**Great job, {}!**\n\
             You successfully claimed and cooked the order.\n\n\
             👋 **Instructor:** They have completed the simulation. You can review their performance now.",
            trainee.mention()
        ),
        Tone::Success,
    ))
    .with_content(session.instructor_id.mention())
}

/// Full track moves on to delivery; addressed to the trainee.
pub fn ready_for_delivery(trainee: &UserId, session: &Session) -> Message {
    Message::card(Notification::new(
        "✅ Order Ready for Delivery!",
        format!(
            "Ding! 🛎️ The **{}** is fresh out of the oven.\n\n\
             **⚠️ IMPORTANT REAL WORLD TIP:**\n\
             When you run the next command, the bot will DM you proof images. \
             **Always SAVE those images** to your phone or PC. \
             You will need to upload them manually in the customer's channel later.\n\n\
             **Your Goal:** Dispatch the order!\n\
             👉 **Type:** `/deliver`",
            session.item
        ),
        Tone::Wait,
    ))
    .with_content(trainee.mention())
}

/// The simulated dispatch DM sent to the trainee.
pub fn dispatch_instructions(session: &Session) -> Message {
    Message::card(Notification::new(
        "📦 [SIMULATION] Bot DM",
        format!(
            "**Hey there! 👋 Here is the info for your delivery.**\n\n\
             **1. Save the Proofs:** (In a real order, images would be attached here. Save them!)\n\
             **2. Go to the Server:** `discord.gg/simulated-server`\n\
             **3. Find the Channel:** Look for the customer {}\n\
             **4. Paste your Script:** \"Hello! Here is your order...\"\n\
             **5. Upload Proofs:** Attach the images you saved.\n\n\
             **✅ LAST STEP FOR TODAY:**\n\
             Go back to the training channel and **send your Delivery Script** to the Instructor to finish up!",
            session.instructor_id.mention()
        ),
        Tone::Brand,
    ))
}

/// Delivery finished; addressed to the instructor for script review.
pub fn delivery_complete(trainee: &UserId, session: &Session) -> Message {
    Message::card(Notification::new(
        "🚚 Delivery Simulation Complete!",
        format!(
            "**Nice work, {}!** 🎉\n\n\
             You have triggered the dispatch system. Check your DMs to see what the bot sent you.\n\n\
             👇 **Instructor Action:**\n\
             The trainee has been asked to paste their Delivery Script here. \
             Once you verify it looks good, you can grant them the role!",
            trainee.mention()
        ),
        Tone::Success,
    ))
    .with_content(session.instructor_id.mention())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::OrderDetails;

    fn session(mode: Mode) -> Session {
        Session::new(
            UserId::new("coach"),
            mode,
            OrderDetails {
                item: "Choco Lava Cake 🍰".into(),
                order_id: "GHI789".into(),
            },
        )
    }

    #[test]
    fn start_card_depends_on_track() {
        let trainee = UserId::new("t1");

        let delivery = session_started(&trainee, &session(Mode::Delivery));
        let card = delivery.notification.as_ref().unwrap();
        assert_eq!(card.tone, Tone::Wait);
        assert!(card.description.contains("`/deliver`"));
        assert!(card.description.contains("`GHI789`"));

        let kitchen = session_started(&trainee, &session(Mode::Full));
        let card = kitchen.notification.as_ref().unwrap();
        assert_eq!(card.tone, Tone::Brand);
        assert!(card.description.contains("`/claim`"));
        assert!(kitchen.mentions(&trainee));
    }

    #[test]
    fn completion_cards_address_instructor() {
        let trainee = UserId::new("t1");
        let s = session(Mode::Cook);
        assert!(cooking_passed(&trainee, &s).mentions(&s.instructor_id));
        assert!(delivery_complete(&trainee, &s).mentions(&s.instructor_id));
        assert!(ready_for_delivery(&trainee, &s).mentions(&trainee));
    }

    #[test]
    fn cooking_card_states_delay() {
        let m = cooking_started(&session(Mode::Cook), 5);
        assert!(m.notification.unwrap().description.contains("Waiting 5 seconds"));
    }
}
